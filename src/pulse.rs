use crate::config::PulseConfig;

/// The three scalars driving one frame of the pulse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseParams {
    pub brightness: f32,
    pub blur_radius: f32,
    pub angle_deg: f32,
}

/// Sample the pulse at frame `index`.
///
/// The phase `t = index / frame_count` walks `frame_count` equally spaced
/// points through exactly one sine period, so the parameters at index
/// `frame_count` equal those at index 0 and the loop closes without a
/// duplicated boundary frame.
pub fn pulse_params(index: u32, cfg: &PulseConfig) -> PulseParams {
    let t = f64::from(index) / f64::from(cfg.frame_count);
    let s = (std::f64::consts::TAU * t).sin();

    PulseParams {
        brightness: (1.0 + f64::from(cfg.pulse_brightness) * s) as f32,
        blur_radius: (f64::from(cfg.base_blur) + f64::from(cfg.pulse_blur) * (0.5 + 0.5 * s))
            as f32,
        angle_deg: (f64::from(cfg.max_rotation_deg) * s) as f32,
    }
}
