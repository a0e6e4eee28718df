use image::DynamicImage;
use rayon::prelude::*;

use crate::{
    canvas::normalize_canvas,
    compose::compose_frame,
    config::PulseConfig,
    error::GlowpulseResult,
    mask::circle_mask,
    pulse::pulse_params,
    quantize::{QuantizedFrame, quantize_frame},
};

/// The finished loop: quantized frames in display order plus the uniform
/// per-frame delay. Handed to an encoder and then dropped.
#[derive(Clone, Debug)]
pub struct Animation {
    pub frames: Vec<QuantizedFrame>,
    pub duration_ms: u32,
}

/// Run the whole pulse loop for one source image.
///
/// The working canvas and mask are built once and shared read-only; each
/// frame depends only on them and its own index, so frames are synthesized on
/// the rayon pool and collected back in index order. Any frame error aborts
/// the run with no partial result.
#[tracing::instrument(skip(source, cfg), fields(size = cfg.target_size, frames = cfg.frame_count))]
pub fn render_animation(source: &DynamicImage, cfg: &PulseConfig) -> GlowpulseResult<Animation> {
    cfg.validate()?;

    let canvas = normalize_canvas(source, cfg.target_size)?;
    let mask = if cfg.keep_circular_mask {
        Some(circle_mask(cfg.target_size, cfg.mask_feather)?)
    } else {
        None
    };
    tracing::debug!(masked = mask.is_some(), "canvas prepared");

    let frames = (0..cfg.frame_count)
        .into_par_iter()
        .map(|index| {
            let params = pulse_params(index, cfg);
            let frame = compose_frame(&canvas, mask.as_ref(), &params)?;
            Ok(quantize_frame(&frame))
        })
        .collect::<GlowpulseResult<Vec<_>>>()?;

    tracing::debug!(count = frames.len(), "frames quantized");
    Ok(Animation {
        frames,
        duration_ms: cfg.duration_ms(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GlowpulseError;
    use image::{Rgba, RgbaImage};

    fn white_square(side: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            side,
            side,
            Rgba([255, 255, 255, 255]),
        ))
    }

    #[test]
    fn every_frame_matches_the_target_size() {
        let cfg = PulseConfig {
            target_size: 48,
            frame_count: 5,
            ..PulseConfig::default()
        };
        let anim = render_animation(&white_square(20), &cfg).unwrap();
        assert_eq!(anim.frames.len(), 5);
        for f in &anim.frames {
            assert_eq!((f.width, f.height), (48, 48));
            assert_eq!(f.indices.len(), 48 * 48);
        }
    }

    #[test]
    fn invalid_config_aborts_before_any_work() {
        let cfg = PulseConfig {
            frame_count: 0,
            ..PulseConfig::default()
        };
        assert!(matches!(
            render_animation(&white_square(8), &cfg),
            Err(GlowpulseError::InvalidConfig(_))
        ));
    }

    #[test]
    fn duration_comes_from_the_frame_rate() {
        let cfg = PulseConfig {
            target_size: 16,
            frame_count: 2,
            fps: 25,
            ..PulseConfig::default()
        };
        let anim = render_animation(&white_square(16), &cfg).unwrap();
        assert_eq!(anim.duration_ms, 40);
    }
}
