use image::{GrayImage, RgbaImage};

use crate::error::{GlowpulseError, GlowpulseResult};

/// Separable Gaussian blur of an RGBA image. `radius` is in pixels; a radius
/// that rounds down to zero pixels returns an unchanged copy.
pub fn blur_rgba(src: &RgbaImage, radius: f32) -> GlowpulseResult<RgbaImage> {
    let (width, height) = src.dimensions();
    let out = blur_channels::<4>(src.as_raw(), width, height, radius)?;
    RgbaImage::from_raw(width, height, out)
        .ok_or_else(|| anyhow::anyhow!("blur produced a mismatched rgba buffer"))
        .map_err(GlowpulseError::from)
}

/// Same blur for a single-channel mask.
pub fn blur_gray(src: &GrayImage, radius: f32) -> GlowpulseResult<GrayImage> {
    let (width, height) = src.dimensions();
    let out = blur_channels::<1>(src.as_raw(), width, height, radius)?;
    GrayImage::from_raw(width, height, out)
        .ok_or_else(|| anyhow::anyhow!("blur produced a mismatched gray buffer"))
        .map_err(GlowpulseError::from)
}

fn blur_channels<const C: usize>(
    src: &[u8],
    width: u32,
    height: u32,
    radius: f32,
) -> GlowpulseResult<Vec<u8>> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(GlowpulseError::invalid_config(
            "blur radius must be finite and >= 0",
        ));
    }
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(C))
        .ok_or_else(|| GlowpulseError::resource_exhausted("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(GlowpulseError::from(anyhow::anyhow!(
            "blur expects src matching width*height*{C}"
        )));
    }

    let radius_px = radius.ceil() as u32;
    if radius_px == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius_px, radius * 0.5)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass::<C>(src, &mut tmp, width, height, &kernel);
    vertical_pass::<C>(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

// Fixed-point Q16 weights summing to exactly 1<<16, so repeated blurs cannot
// drift the total energy of a constant image.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> GlowpulseResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(GlowpulseError::invalid_config("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]);
        weights[mid] = (mid_val + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass<const C: usize>(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; C];
            for (ki, &kw) in k.iter().enumerate() {
                let dx = ki as i32 - radius;
                let sx = (x + dx).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * C;
                for c in 0..C {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * C;
            for c in 0..C {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass<const C: usize>(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; C];
            for (ki, &kw) in k.iter().enumerate() {
                let dy = ki as i32 - radius;
                let sy = (y + dy).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * C;
                for c in 0..C {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * C;
            for c in 0..C {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}
