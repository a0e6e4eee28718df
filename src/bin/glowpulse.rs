use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;

use glowpulse::{GlowpulseError, PulseConfig};

#[derive(Parser, Debug)]
#[command(
    name = "glowpulse",
    version,
    about = "Turn a static logo into a seamlessly looping glow-pulse GIF"
)]
struct Cli {
    /// Input image (any format the decoder understands).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Optional JSON settings file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square output canvas.
    #[arg(long)]
    size: Option<u32>,

    /// Number of frames per loop.
    #[arg(long)]
    frames: Option<u32>,

    /// Playback rate in frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Minimum glow blur radius in pixels.
    #[arg(long)]
    base_blur: Option<f32>,

    /// Additional blur radius at the pulse peak.
    #[arg(long)]
    pulse_blur: Option<f32>,

    /// Brightness oscillation amplitude.
    #[arg(long = "pulse-bright")]
    pulse_bright: Option<f32>,

    /// Maximum tilt in degrees.
    #[arg(long = "max-rotate")]
    max_rotate: Option<f32>,

    /// Feather radius of the circular mask edge.
    #[arg(long)]
    mask_feather: Option<f32>,

    /// Clip the result to a feathered circle.
    #[arg(long)]
    keep_circle: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;

    let source = image::open(&cli.in_path).map_err(|e| {
        GlowpulseError::image_load(format!("open '{}': {e}", cli.in_path.display()))
    })?;

    let anim = glowpulse::render_animation(&source, &cfg)?;
    glowpulse::write_gif(&cli.out, &anim)?;

    eprintln!("wrote {}", cli.out.display());
    Ok(())
}

fn resolve_config(cli: &Cli) -> anyhow::Result<PulseConfig> {
    let mut cfg = match &cli.config {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open config '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f)).context("parse config JSON")?
        }
        None => PulseConfig::default(),
    };

    if let Some(v) = cli.size {
        cfg.target_size = v;
    }
    if let Some(v) = cli.frames {
        cfg.frame_count = v;
    }
    if let Some(v) = cli.fps {
        cfg.fps = v;
    }
    if let Some(v) = cli.base_blur {
        cfg.base_blur = v;
    }
    if let Some(v) = cli.pulse_blur {
        cfg.pulse_blur = v;
    }
    if let Some(v) = cli.pulse_bright {
        cfg.pulse_brightness = v;
    }
    if let Some(v) = cli.max_rotate {
        cfg.max_rotation_deg = v;
    }
    if let Some(v) = cli.mask_feather {
        cfg.mask_feather = v;
    }
    if cli.keep_circle {
        cfg.keep_circular_mask = true;
    }

    Ok(cfg)
}
