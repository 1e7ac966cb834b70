//! 256-entry RGB palettes
//!
//! A palette chunk is 768 bytes: entry `i` is the RGB triplet at bytes
//! `3i..3i + 3`. Index 0 is conventionally black or transparent.
//!
//! A few small ranges of the game palette are colour-cycled to animate
//! water, lights and screens. [`rotate_slots`] produces the palette for a
//! given number of cycling steps.

use std::time::Duration;

use thiserror::Error;

/// Number of palette entries
pub const PALETTE_ENTRIES: usize = 256;

/// Size of an encoded palette in bytes
pub const PALETTE_SIZE: usize = PALETTE_ENTRIES * 3;

/// Colour-cycling ranges as `(first index, entry count)`
pub const ROTATION_SLOTS: [(usize, usize); 7] = [
    (3, 5),
    (11, 5),
    (16, 5),
    (21, 3),
    (24, 3),
    (27, 5),
    (32, 4),
];

/// Palette decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Fewer than 768 bytes available
    #[error("palette truncated: need 768 bytes, have {0}")]
    TruncatedPalette(usize),
}

/// Result type for palette operations
pub type PaletteResult<T> = Result<T, PaletteError>;

/// One palette entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

/// 256 RGB entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_ENTRIES],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [Rgb::default(); PALETTE_ENTRIES],
        }
    }
}

impl Palette {
    /// Build a palette from its entries
    pub const fn from_colors(colors: [Rgb; PALETTE_ENTRIES]) -> Self {
        Self { colors }
    }

    /// Entry at `index`
    pub fn color(&self, index: u8) -> Rgb {
        self.colors[usize::from(index)]
    }

    /// All entries
    pub fn colors(&self) -> &[Rgb; PALETTE_ENTRIES] {
        &self.colors
    }

    /// RGBA for `index`; index 0 becomes fully transparent when requested
    pub fn to_rgba(&self, index: u8, transparent_zero: bool) -> [u8; 4] {
        let Rgb { r, g, b } = self.color(index);
        let alpha = if transparent_zero && index == 0 { 0 } else { 0xFF };
        [r, g, b, alpha]
    }
}

/// Decode a palette from the first 768 bytes of `payload`
pub fn decode_palette(payload: &[u8]) -> PaletteResult<Palette> {
    let bytes = payload
        .get(..PALETTE_SIZE)
        .ok_or(PaletteError::TruncatedPalette(payload.len()))?;

    let mut colors = [Rgb::default(); PALETTE_ENTRIES];
    for (color, rgb) in colors.iter_mut().zip(bytes.chunks_exact(3)) {
        *color = Rgb {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        };
    }
    Ok(Palette { colors })
}

/// Cycle every [`ROTATION_SLOTS`] range forward by `steps` positions.
///
/// After one step the colour at `start` moves to `start + 1` and the last
/// colour of the range wraps around to `start`. Entries outside the slots
/// are untouched.
pub fn rotate_slots(palette: &Palette, steps: usize) -> Palette {
    let mut rotated = palette.clone();
    for &(start, count) in &ROTATION_SLOTS {
        let steps = steps % count;
        for i in 0..count {
            rotated.colors[start + (i + steps) % count] = palette.colors[start + i];
        }
    }
    rotated
}

/// Number of cycling steps after `elapsed` time with one step per `interval`
pub fn rotation_steps(elapsed: Duration, interval: Duration) -> usize {
    if interval.is_zero() {
        return 0;
    }
    (elapsed.as_nanos() / interval.as_nanos()) as usize
}
