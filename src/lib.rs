#![forbid(unsafe_code)]

pub mod animate;
pub mod blend;
pub mod blur;
pub mod canvas;
pub mod compose;
pub mod config;
pub mod encode_gif;
pub mod error;
pub mod mask;
pub mod pulse;
pub mod quantize;
pub mod rotate;

pub use animate::{Animation, render_animation};
pub use canvas::normalize_canvas;
pub use compose::compose_frame;
pub use config::{MAX_FRAME_COUNT, MAX_TARGET_SIZE, PulseConfig};
pub use encode_gif::{write_gif, write_gif_to};
pub use error::{GlowpulseError, GlowpulseResult};
pub use mask::circle_mask;
pub use pulse::{PulseParams, pulse_params};
pub use quantize::{MAX_PALETTE_COLORS, QuantizedFrame, quantize_frame};
