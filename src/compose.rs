use image::{GrayImage, RgbaImage};

use crate::{
    blend, blur,
    error::{GlowpulseError, GlowpulseResult},
    pulse::PulseParams,
    rotate,
};

/// Synthesize one frame from the shared base canvas.
///
/// Order matters: brighten, blur the brightened layer into a glow, screen the
/// two together, tilt, then clip. The mask multiplies alpha last so the glow
/// cannot spill past the circle.
pub fn compose_frame(
    base: &RgbaImage,
    mask: Option<&GrayImage>,
    params: &PulseParams,
) -> GlowpulseResult<RgbaImage> {
    if !params.blur_radius.is_finite() || params.blur_radius < 0.0 {
        return Err(GlowpulseError::invalid_config(
            "derived glow blur radius must be finite and >= 0",
        ));
    }

    let bright = blend::scale_brightness(base, params.brightness);
    let glow = blur::blur_rgba(&bright, params.blur_radius)?;
    let mut frame = blend::screen(&bright, &glow)?;

    if params.angle_deg != 0.0 {
        frame = rotate::rotate_about_center(&frame, params.angle_deg);
    }

    if let Some(mask) = mask {
        blend::apply_alpha_mask(&mut frame, mask)?;
    }

    Ok(frame)
}
