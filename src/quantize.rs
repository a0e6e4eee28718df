use color_quant::NeuQuant;
use image::{Rgba, RgbaImage, imageops};

/// Most colors a frame's palette may hold, transparency slot included.
pub const MAX_PALETTE_COLORS: usize = 128;

/// NeuQuant sampling stride: 1 learns from every pixel, larger trades
/// fidelity for speed.
const SAMPLE_FACTOR: i32 = 10;

/// Pixels below this alpha fold into the reserved transparent slot.
const ALPHA_CUTOFF: u8 = 128;

/// One frame reduced to an indexed image plus its own RGBA palette.
/// Frames are quantized independently; nothing here is shared across frames.
#[derive(Clone, Debug)]
pub struct QuantizedFrame {
    pub width: u32,
    pub height: u32,
    pub indices: Vec<u8>,
    pub palette_rgba: Vec<u8>,
}

struct PaletteMap(NeuQuant);

impl imageops::ColorMap for PaletteMap {
    type Color = Rgba<u8>;

    fn index_of(&self, color: &Rgba<u8>) -> usize {
        self.0.index_of(&color.0)
    }

    fn map_color(&self, color: &mut Rgba<u8>) {
        self.0.map_pixel(&mut color.0);
    }
}

/// Reduce an RGBA frame to at most [`MAX_PALETTE_COLORS`] colors with
/// Floyd-Steinberg error diffusion.
///
/// Alpha is snapped to opaque-or-nothing first: pixels under the cutoff land
/// on a reserved fully-transparent palette entry, everything else is
/// quantized opaque. Partial feather alpha therefore collapses to a binary
/// edge, which is all a single-transparent-index target can represent anyway.
pub fn quantize_frame(frame: &RgbaImage) -> QuantizedFrame {
    let mut work = frame.clone();
    let mut has_transparent = false;
    for px in work.pixels_mut() {
        if px.0[3] < ALPHA_CUTOFF {
            px.0 = [0, 0, 0, 0];
            has_transparent = true;
        } else {
            px.0[3] = 255;
        }
    }

    let opaque_colors = if has_transparent {
        MAX_PALETTE_COLORS - 1
    } else {
        MAX_PALETTE_COLORS
    };
    let map = PaletteMap(NeuQuant::new(SAMPLE_FACTOR, opaque_colors, work.as_raw()));

    imageops::dither(&mut work, &map);
    let indexed = imageops::index_colors(&work, &map);

    let mut indices = indexed.into_raw();
    let mut palette_rgba = map.0.color_map_rgba();

    if has_transparent {
        let transparent_idx = (palette_rgba.len() / 4) as u8;
        palette_rgba.extend_from_slice(&[0, 0, 0, 0]);
        for (index, px) in indices.iter_mut().zip(frame.pixels()) {
            if px.0[3] < ALPHA_CUTOFF {
                *index = transparent_idx;
            }
        }
    }

    QuantizedFrame {
        width: frame.width(),
        height: frame.height(),
        indices,
        palette_rgba,
    }
}
