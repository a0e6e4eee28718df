use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use gif::{DisposalMethod, Encoder, Frame, Repeat};

use crate::{
    animate::Animation,
    error::{GlowpulseError, GlowpulseResult},
};

/// Write the animation as a looping GIF at `path`, creating parent
/// directories as needed.
pub fn write_gif(path: &Path, anim: &Animation) -> GlowpulseResult<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path)
        .map_err(|e| GlowpulseError::encode(format!("create '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    write_gif_to(&mut writer, anim)?;
    writer
        .flush()
        .map_err(|e| GlowpulseError::encode(format!("flush '{}': {e}", path.display())))
}

/// Stream the animation into any writer as GIF bytes.
///
/// Every frame carries its own local palette straight from the quantizer,
/// loops forever, and asks the player to restore the background between
/// frames so transparency is not smeared from one frame into the next. The
/// transparent index, when the palette has one, is the first entry below 50%
/// alpha.
pub fn write_gif_to<W: Write>(writer: W, anim: &Animation) -> GlowpulseResult<()> {
    let Some(first) = anim.frames.first() else {
        return Err(GlowpulseError::encode("animation has no frames"));
    };
    let width = u16::try_from(first.width)
        .map_err(|_| GlowpulseError::encode("frame width exceeds the gif limit"))?;
    let height = u16::try_from(first.height)
        .map_err(|_| GlowpulseError::encode("frame height exceeds the gif limit"))?;

    let mut encoder = Encoder::new(writer, width, height, &[])
        .map_err(|e| GlowpulseError::encode(format!("start gif stream: {e}")))?;
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| GlowpulseError::encode(format!("set loop count: {e}")))?;

    let delay_cs = (anim.duration_ms / 10).max(1) as u16;

    for quantized in &anim.frames {
        if (quantized.width, quantized.height) != (first.width, first.height) {
            return Err(GlowpulseError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                quantized.width, quantized.height, first.width, first.height
            )));
        }

        let frame = Frame {
            width,
            height,
            delay: delay_cs,
            dispose: DisposalMethod::Background,
            transparent: transparent_index(&quantized.palette_rgba),
            palette: Some(rgb_palette(&quantized.palette_rgba)),
            buffer: Cow::Borrowed(quantized.indices.as_slice()),
            ..Frame::default()
        };
        encoder
            .write_frame(&frame)
            .map_err(|e| GlowpulseError::encode(format!("write gif frame: {e}")))?;
    }

    Ok(())
}

fn rgb_palette(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}

fn transparent_index(rgba: &[u8]) -> Option<u8> {
    rgba.chunks_exact(4)
        .position(|px| px[3] < 128)
        .map(|i| i as u8)
}

fn ensure_parent_dir(path: &Path) -> GlowpulseResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            GlowpulseError::encode(format!(
                "create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}
