use crate::error::{GlowpulseError, GlowpulseResult};

/// Upper bound on the square canvas side length.
pub const MAX_TARGET_SIZE: u32 = 4096;

/// Upper bound on the number of frames in one loop.
pub const MAX_FRAME_COUNT: u32 = 1024;

/// Fully-resolved settings for one animation run.
///
/// The defaults reproduce the look of a medium-intensity logo pulse: a 512px
/// canvas, a two-second loop at 20 fps, and a gentle tilt. A config is
/// immutable once handed to the renderer; `validate` is called at the start
/// of every run.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Side length of the square working canvas, in pixels.
    pub target_size: u32,
    /// Number of frames per loop.
    pub frame_count: u32,
    /// Display rate; determines the per-frame delay.
    pub fps: u32,
    /// Minimum glow blur radius, always applied.
    pub base_blur: f32,
    /// Additional blur radius modulated by the sine pulse.
    pub pulse_blur: f32,
    /// Amplitude of the brightness oscillation.
    pub pulse_brightness: f32,
    /// Amplitude of the tilt oscillation, in degrees.
    pub max_rotation_deg: f32,
    /// Feather radius of the circular mask edge, in pixels.
    pub mask_feather: f32,
    /// Clip the composite to a feathered circle.
    pub keep_circular_mask: bool,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            target_size: 512,
            frame_count: 40,
            fps: 20,
            base_blur: 2.0,
            pulse_blur: 7.0,
            pulse_brightness: 0.38,
            max_rotation_deg: 1.5,
            mask_feather: 2.0,
            keep_circular_mask: false,
        }
    }
}

impl PulseConfig {
    pub fn validate(&self) -> GlowpulseResult<()> {
        if self.target_size == 0 {
            return Err(GlowpulseError::invalid_config("target_size must be > 0"));
        }
        if self.frame_count == 0 {
            return Err(GlowpulseError::invalid_config("frame_count must be > 0"));
        }
        if self.fps == 0 {
            return Err(GlowpulseError::invalid_config("fps must be > 0"));
        }
        if self.target_size > MAX_TARGET_SIZE {
            return Err(GlowpulseError::resource_exhausted(format!(
                "target_size {} exceeds the maximum of {}",
                self.target_size, MAX_TARGET_SIZE
            )));
        }
        if self.frame_count > MAX_FRAME_COUNT {
            return Err(GlowpulseError::resource_exhausted(format!(
                "frame_count {} exceeds the maximum of {}",
                self.frame_count, MAX_FRAME_COUNT
            )));
        }

        for (name, value) in [
            ("base_blur", self.base_blur),
            ("pulse_blur", self.pulse_blur),
            ("pulse_brightness", self.pulse_brightness),
            ("max_rotation_deg", self.max_rotation_deg),
            ("mask_feather", self.mask_feather),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GlowpulseError::invalid_config(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        if self.keep_circular_mask && self.mask_feather * 2.0 >= self.target_size as f32 {
            return Err(GlowpulseError::invalid_config(
                "mask_feather insets leave no circle to draw",
            ));
        }

        Ok(())
    }

    /// Per-frame display duration, rounded to the nearest millisecond.
    pub fn duration_ms(&self) -> u32 {
        (1000 + self.fps / 2) / self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        PulseConfig::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_fields() {
        for cfg in [
            PulseConfig {
                target_size: 0,
                ..PulseConfig::default()
            },
            PulseConfig {
                frame_count: 0,
                ..PulseConfig::default()
            },
            PulseConfig {
                fps: 0,
                ..PulseConfig::default()
            },
        ] {
            assert!(matches!(
                cfg.validate(),
                Err(GlowpulseError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn validate_rejects_negative_and_non_finite_amplitudes() {
        let cfg = PulseConfig {
            pulse_blur: -1.0,
            ..PulseConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(GlowpulseError::InvalidConfig(_))
        ));

        let cfg = PulseConfig {
            pulse_brightness: f32::NAN,
            ..PulseConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(GlowpulseError::InvalidConfig(_))
        ));
    }

    #[test]
    fn validate_reports_exhaustion_past_ceilings() {
        let cfg = PulseConfig {
            target_size: MAX_TARGET_SIZE + 1,
            ..PulseConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(GlowpulseError::ResourceExhausted(_))
        ));

        let cfg = PulseConfig {
            frame_count: MAX_FRAME_COUNT + 1,
            ..PulseConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(GlowpulseError::ResourceExhausted(_))
        ));
    }

    #[test]
    fn duration_rounds_to_nearest_ms() {
        let cfg = |fps| PulseConfig {
            fps,
            ..PulseConfig::default()
        };
        assert_eq!(cfg(20).duration_ms(), 50);
        assert_eq!(cfg(30).duration_ms(), 33);
        assert_eq!(cfg(15).duration_ms(), 67);
    }

    #[test]
    fn json_roundtrip() {
        let cfg = PulseConfig {
            target_size: 256,
            keep_circular_mask: true,
            ..PulseConfig::default()
        };
        let s = serde_json::to_string_pretty(&cfg).unwrap();
        let de: PulseConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(de.target_size, 256);
        assert!(de.keep_circular_mask);
        assert_eq!(de.frame_count, cfg.frame_count);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let de: PulseConfig = serde_json::from_str(r#"{ "target_size": 128 }"#).unwrap();
        assert_eq!(de.target_size, 128);
        assert_eq!(de.fps, PulseConfig::default().fps);
    }
}
