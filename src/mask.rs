use image::GrayImage;

use crate::{
    blur::blur_gray,
    error::{GlowpulseError, GlowpulseResult},
};

/// Build the circular clip mask: a filled circle inscribed in a
/// `diameter`x`diameter` square, inset by `feather` pixels on every side,
/// drawn with a one-pixel analytic anti-aliased edge and then Gaussian-blurred
/// by `feather`. With `feather == 0` the edge stays hard.
///
/// Built at most once per run and shared read-only across frames.
pub fn circle_mask(diameter: u32, feather: f32) -> GlowpulseResult<GrayImage> {
    if diameter == 0 {
        return Err(GlowpulseError::invalid_config("mask diameter must be > 0"));
    }
    if !feather.is_finite() || feather < 0.0 {
        return Err(GlowpulseError::invalid_config(
            "mask feather must be finite and >= 0",
        ));
    }
    let radius = f64::from(diameter) * 0.5 - f64::from(feather);
    if radius <= 0.0 {
        return Err(GlowpulseError::invalid_config(
            "mask feather insets leave no circle to draw",
        ));
    }

    let center = f64::from(diameter) * 0.5;
    let mask = GrayImage::from_fn(diameter, diameter, |x, y| {
        let dx = f64::from(x) + 0.5 - center;
        let dy = f64::from(y) + 0.5 - center;
        let dist = (dx * dx + dy * dy).sqrt();
        let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
        image::Luma([(coverage * 255.0).round() as u8])
    });

    blur_gray(&mask, feather)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_mask_is_binary_away_from_the_rim() {
        let d = 64;
        let m = circle_mask(d, 0.0).unwrap();
        assert_eq!(m.dimensions(), (d, d));

        assert_eq!(m.get_pixel(32, 32).0[0], 255);
        assert_eq!(m.get_pixel(32, 4).0[0], 255);

        assert_eq!(m.get_pixel(0, 0).0[0], 0);
        assert_eq!(m.get_pixel(63, 0).0[0], 0);
        assert_eq!(m.get_pixel(63, 63).0[0], 0);
    }

    #[test]
    fn feathered_mask_fades_monotonically_outward() {
        let d = 64;
        let m = circle_mask(d, 4.0).unwrap();

        assert_eq!(m.get_pixel(32, 32).0[0], 255);
        assert_eq!(m.get_pixel(0, 0).0[0], 0);

        // Walk a ray from the center to the edge; allow one count of
        // fixed-point jitter.
        let mut prev = m.get_pixel(32, 32).0[0];
        for x in 33..64 {
            let v = m.get_pixel(x, 32).0[0];
            assert!(v <= prev.saturating_add(1), "x={x} v={v} prev={prev}");
            prev = v;
        }
    }

    #[test]
    fn feathered_rim_has_intermediate_values() {
        let m = circle_mask(64, 4.0).unwrap();
        let rim = (28..36)
            .map(|x| m.get_pixel(x + 28, 32).0[0])
            .collect::<Vec<_>>();
        assert!(rim.iter().any(|&v| v > 0 && v < 255), "rim {rim:?}");
    }

    #[test]
    fn oversized_feather_is_rejected() {
        assert!(matches!(
            circle_mask(16, 8.0),
            Err(GlowpulseError::InvalidConfig(_))
        ));
        assert!(matches!(
            circle_mask(0, 0.0),
            Err(GlowpulseError::InvalidConfig(_))
        ));
    }
}
