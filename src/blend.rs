use image::{GrayImage, Rgba, RgbaImage};

use crate::error::{GlowpulseError, GlowpulseResult};

/// Scale the color channels of every pixel by `factor`, saturating at 255.
/// Alpha is left untouched.
pub fn scale_brightness(src: &RgbaImage, factor: f32) -> RgbaImage {
    let scale = (f64::from(factor.max(0.0)) * 256.0).round() as u64;
    let mut out = src.clone();
    for px in out.pixels_mut() {
        for c in 0..3 {
            px.0[c] = ((u64::from(px.0[c]) * scale + 128) >> 8).min(255) as u8;
        }
    }
    out
}

/// Per-channel screen blend: `255 - (255-a)(255-b)/255`. Only ever lightens,
/// which is what lets the blurred glow halo sit on top of the sharp layer
/// without darkening anything.
pub fn screen(a: &RgbaImage, b: &RgbaImage) -> GlowpulseResult<RgbaImage> {
    if a.dimensions() != b.dimensions() {
        return Err(GlowpulseError::from(anyhow::anyhow!(
            "screen blend expects equally sized layers"
        )));
    }
    let mut out = RgbaImage::new(a.width(), a.height());
    for ((pa, pb), po) in a.pixels().zip(b.pixels()).zip(out.pixels_mut()) {
        let mut px = [0u8; 4];
        for c in 0..4 {
            px[c] = screen_u8(pa.0[c], pb.0[c]);
        }
        *po = Rgba(px);
    }
    Ok(out)
}

/// Multiply the frame's alpha channel by the mask, treated as a [0,1] factor.
pub fn apply_alpha_mask(frame: &mut RgbaImage, mask: &GrayImage) -> GlowpulseResult<()> {
    if frame.dimensions() != mask.dimensions() {
        return Err(GlowpulseError::from(anyhow::anyhow!(
            "mask dimensions must match the frame"
        )));
    }
    for (px, m) in frame.pixels_mut().zip(mask.pixels()) {
        px.0[3] = mul_div255(u16::from(px.0[3]), u16::from(m.0[0]));
    }
    Ok(())
}

fn screen_u8(a: u8, b: u8) -> u8 {
    255 - mul_div255(255 - u16::from(a), 255 - u16::from(b))
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
