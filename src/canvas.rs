use image::{DynamicImage, RgbaImage, imageops};

use crate::error::{GlowpulseError, GlowpulseResult};

/// Fit the source image into a transparent `size`x`size` canvas, preserving
/// aspect ratio and centering with floor-divided margins. A source that is
/// already exactly square at the target size passes through untouched.
pub fn normalize_canvas(source: &DynamicImage, size: u32) -> GlowpulseResult<RgbaImage> {
    if size == 0 {
        return Err(GlowpulseError::invalid_config("target size must be > 0"));
    }

    let src = source.to_rgba8();
    let (w, h) = src.dimensions();
    if w == 0 || h == 0 {
        return Err(GlowpulseError::image_load("source image has zero size"));
    }
    if (w, h) == (size, size) {
        return Ok(src);
    }

    let ratio = (f64::from(size) / f64::from(w)).min(f64::from(size) / f64::from(h));
    let new_w = ((f64::from(w) * ratio).round() as u32).clamp(1, size);
    let new_h = ((f64::from(h) * ratio).round() as u32).clamp(1, size);

    let scaled = if (new_w, new_h) == (w, h) {
        src
    } else {
        imageops::resize(&src, new_w, new_h, imageops::FilterType::Lanczos3)
    };

    let mut canvas = RgbaImage::new(size, size);
    let left = i64::from((size - new_w) / 2);
    let top = i64::from((size - new_h) / 2);
    imageops::overlay(&mut canvas, &scaled, left, top);
    Ok(canvas)
}
