use image::{Rgba, RgbaImage};

/// Rotate about the canvas center by `angle_deg` (positive is
/// counter-clockwise) without changing the canvas size. Content leaving the
/// frame is discarded; uncovered area is transparent. Sampling is bicubic
/// (Catmull-Rom), with off-canvas taps treated as transparent.
pub fn rotate_about_center(src: &RgbaImage, angle_deg: f32) -> RgbaImage {
    let (w, h) = src.dimensions();
    if w == 0 || h == 0 || angle_deg == 0.0 {
        return src.clone();
    }

    let theta = f64::from(angle_deg).to_radians();
    let (sin_t, cos_t) = theta.sin_cos();
    let cx = f64::from(w) * 0.5;
    let cy = f64::from(h) * 0.5;

    let mut out = RgbaImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            let sx = cos_t * dx - sin_t * dy + cx - 0.5;
            let sy = sin_t * dx + cos_t * dy + cy - 0.5;
            out.put_pixel(x, y, Rgba(sample_bicubic(src, sx, sy)));
        }
    }
    out
}

fn sample_bicubic(src: &RgbaImage, sx: f64, sy: f64) -> [u8; 4] {
    let (w, h) = src.dimensions();
    let x0 = sx.floor();
    let y0 = sy.floor();
    let wx = cubic_weights(sx - x0);
    let wy = cubic_weights(sy - y0);

    let mut acc = [0.0f64; 4];
    for (j, wyj) in wy.iter().enumerate() {
        let py = y0 as i64 + j as i64 - 1;
        if py < 0 || py >= i64::from(h) {
            continue;
        }
        for (i, wxi) in wx.iter().enumerate() {
            let px = x0 as i64 + i as i64 - 1;
            if px < 0 || px >= i64::from(w) {
                continue;
            }
            let weight = wxi * wyj;
            let p = src.get_pixel(px as u32, py as u32).0;
            for c in 0..4 {
                acc[c] += weight * f64::from(p[c]);
            }
        }
    }

    let mut out = [0u8; 4];
    for c in 0..4 {
        out[c] = acc[c].round().clamp(0.0, 255.0) as u8;
    }
    out
}

// Catmull-Rom weights (a = -0.5) for the four taps around a sample point.
fn cubic_weights(t: f64) -> [f64; 4] {
    fn k(t: f64) -> f64 {
        let t = t.abs();
        if t <= 1.0 {
            ((1.5 * t - 2.5) * t) * t + 1.0
        } else if t < 2.0 {
            ((-0.5 * t + 2.5) * t - 4.0) * t + 2.0
        } else {
            0.0
        }
    }
    [k(t + 1.0), k(t), k(t - 1.0), k(t - 2.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_angle_is_identity() {
        let src = RgbaImage::from_fn(6, 6, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let out = rotate_about_center(&src, 0.0);
        assert_eq!(out.as_raw(), src.as_raw());
    }

    #[test]
    fn canvas_size_is_preserved() {
        let src = RgbaImage::new(17, 17);
        let out = rotate_about_center(&src, 33.0);
        assert_eq!(out.dimensions(), (17, 17));
    }

    #[test]
    fn center_pixel_of_odd_canvas_is_a_fixed_point() {
        let mut src = RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 255]));
        src.put_pixel(2, 2, Rgba([200, 10, 30, 255]));
        for angle in [7.5f32, 45.0, 90.0, -13.0] {
            let out = rotate_about_center(&src, angle);
            assert_eq!(out.get_pixel(2, 2).0, [200, 10, 30, 255], "angle {angle}");
        }
    }

    #[test]
    fn corners_leave_the_frame_under_a_large_tilt() {
        let src = RgbaImage::from_pixel(32, 32, Rgba([255, 255, 255, 255]));
        let out = rotate_about_center(&src, 45.0);

        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(31, 31).0[3], 0);

        let center = out.get_pixel(16, 16).0;
        assert_eq!(center[3], 255);
        assert!(center[0] >= 250);
    }

    #[test]
    fn interpolation_weights_partition_unity() {
        for t in [0.0, 0.25, 0.5, 0.99] {
            let sum: f64 = cubic_weights(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "t={t} sum={sum}");
        }
    }
}
