//! Bitmap fonts
//!
//! A font chunk is an 84-byte header, a table of glyph x positions and one
//! horizontal strip holding every glyph side by side:
//!
//! ```text
//! 0x00  u16       kind (0xCCCC = 8-bit colour, otherwise 1-bit mono)
//! 0x24  u16       first character
//! 0x26  u16       last character
//! 0x48  u32       offset of the x position table
//! 0x4C  u32       offset of the glyph strip
//! 0x50  u16       strip row length in bytes
//! 0x52  u16       strip height in rows
//! ```
//!
//! Glyph `c` spans columns `x[c - first]..x[c - first + 1]` of the strip.

use binrw::BinRead;
use thiserror::Error;
use tracing::trace;

use crate::cursor::{ByteCursor, UnexpectedEof};

/// Header kind value for 8-bit colour fonts
pub const COLOR_FONT_KIND: u16 = 0xCCCC;

/// Size of the font header
pub const FONT_HEADER_SIZE: usize = 84;

/// Font decoding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontError {
    /// Header could not be read
    #[error("font header: {0}")]
    InvalidHeader(String),

    /// Last character precedes the first
    #[error("invalid character range {first}..={last}")]
    InvalidCharRange {
        /// First character code
        first: u16,
        /// Last character code
        last: u16,
    },

    /// Glyph column lies outside the strip or columns decrease
    #[error("glyph {index} column {x} is invalid for a {strip_width}-pixel strip")]
    GlyphOutOfStrip {
        /// Position in the offset table
        index: usize,
        /// Offending column
        x: u16,
        /// Strip width in pixels
        strip_width: usize,
    },

    /// Offset table or strip runs past the chunk
    #[error("font data truncated: {0}")]
    Truncated(#[from] UnexpectedEof),
}

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Pixel depth of the glyph strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// One bit per pixel, MSB first
    Mono,
    /// One palette index per pixel
    Color,
}

#[derive(Debug, Clone, BinRead)]
#[br(little)]
struct FontHeader {
    kind: u16,
    #[br(pad_before = 34)]
    first_char: u16,
    last_char: u16,
    #[br(pad_before = 32)]
    offset_table: u32,
    bitmap_offset: u32,
    row_bytes: u16,
    height: u16,
}

/// Location of one glyph in the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// First strip column
    pub x: u16,
    /// Width in pixels
    pub width: u16,
}

/// A glyph expanded to one byte per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphImage {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Row-major pixels: 0/1 for mono fonts, palette indices for colour fonts
    pub pixels: Vec<u8>,
}

/// Decoded font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    /// Pixel depth
    pub kind: FontKind,
    /// First character code
    pub first_char: u16,
    /// Last character code
    pub last_char: u16,
    /// Bytes per strip row
    pub row_bytes: u16,
    /// Glyph height
    pub height: u16,
    offsets: Vec<u16>,
    strip: Vec<u8>,
}

impl Font {
    /// Strip width in pixels
    pub fn strip_width(&self) -> usize {
        match self.kind {
            FontKind::Mono => usize::from(self.row_bytes) * 8,
            FontKind::Color => usize::from(self.row_bytes),
        }
    }

    /// Number of glyphs
    pub fn glyph_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Glyph for `ch`, or `None` outside the font's range
    pub fn glyph(&self, ch: char) -> Option<Glyph> {
        let code = u16::try_from(u32::from(ch)).ok()?;
        if code < self.first_char || code > self.last_char {
            return None;
        }
        let index = usize::from(code - self.first_char);
        let x = self.offsets[index];
        Some(Glyph {
            x,
            width: self.offsets[index + 1] - x,
        })
    }

    fn strip_pixel(&self, x: usize, y: usize) -> u8 {
        let row = y * usize::from(self.row_bytes);
        match self.kind {
            FontKind::Mono => (self.strip[row + x / 8] >> (7 - x % 8)) & 1,
            FontKind::Color => self.strip[row + x],
        }
    }

    /// Expand the glyph for `ch` to one byte per pixel
    pub fn render_glyph(&self, ch: char) -> Option<GlyphImage> {
        let glyph = self.glyph(ch)?;
        let mut pixels = Vec::with_capacity(usize::from(glyph.width) * usize::from(self.height));
        for y in 0..usize::from(self.height) {
            for x in usize::from(glyph.x)..usize::from(glyph.x + glyph.width) {
                pixels.push(self.strip_pixel(x, y));
            }
        }
        Some(GlyphImage {
            width: glyph.width,
            height: self.height,
            pixels,
        })
    }

    /// Width in pixels of `text` drawn with this font; unknown characters
    /// count as zero width
    pub fn text_width(&self, text: &str) -> usize {
        text.chars()
            .filter_map(|ch| self.glyph(ch))
            .map(|glyph| usize::from(glyph.width))
            .sum()
    }
}

/// Decode a font chunk
pub fn decode_font(data: &[u8]) -> FontResult<Font> {
    let header = FontHeader::read(&mut std::io::Cursor::new(data))
        .map_err(|e| FontError::InvalidHeader(e.to_string()))?;

    if header.last_char < header.first_char {
        return Err(FontError::InvalidCharRange {
            first: header.first_char,
            last: header.last_char,
        });
    }

    let kind = if header.kind == COLOR_FONT_KIND {
        FontKind::Color
    } else {
        FontKind::Mono
    };

    let mut cursor = ByteCursor::new(data);
    cursor.seek(header.offset_table as usize)?;
    let count = usize::from(header.last_char - header.first_char) + 2;
    let mut offsets = Vec::with_capacity(count);
    for _ in 0..count {
        offsets.push(cursor.read_u16()?);
    }

    cursor.seek(header.bitmap_offset as usize)?;
    let strip = cursor
        .read_bytes(usize::from(header.row_bytes) * usize::from(header.height))?
        .to_vec();

    let font = Font {
        kind,
        first_char: header.first_char,
        last_char: header.last_char,
        row_bytes: header.row_bytes,
        height: header.height,
        offsets,
        strip,
    };

    let strip_width = font.strip_width();
    let mut previous = 0;
    for (index, &x) in font.offsets.iter().enumerate() {
        if x < previous || usize::from(x) > strip_width {
            return Err(FontError::GlyphOutOfStrip {
                index,
                x,
                strip_width,
            });
        }
        previous = x;
    }

    trace!(
        "Decoded {:?} font, characters {}..={}, {} rows",
        font.kind, font.first_char, font.last_char, font.height
    );

    Ok(font)
}
