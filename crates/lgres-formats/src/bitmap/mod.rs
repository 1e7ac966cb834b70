//! Palette-indexed bitmaps
//!
//! Each bitmap block is a 28-byte [`BitmapHeader`] followed by pixel data,
//! stored either raw (`height * stride` bytes) or run-length encoded (see
//! [`rle`]). Multi-frame images store one bitmap per block of the chunk.
//!
//! Some bitmaps carry their own palette inside the block at
//! `palette_offset`: a 4-byte prefix followed by 768 bytes of RGB entries.

mod error;
mod header;
pub mod rle;

pub use error::{BitmapError, BitmapResult};
pub use header::{AnchorRect, BITMAP_HEADER_SIZE, BitmapHeader, BitmapType};

use tracing::trace;

use crate::palette::{Palette, decode_palette};

/// Bytes preceding the RGB entries of an embedded palette
const EMBEDDED_PALETTE_PREFIX: usize = 4;

/// Decode the pixel data that follows a bitmap header.
///
/// Uncompressed bitmaps yield `height * stride` bytes; compressed bitmaps
/// always yield `width * height` bytes.
pub fn decode_bitmap(header: &BitmapHeader, payload: &[u8]) -> BitmapResult<Vec<u8>> {
    match header.bitmap_type {
        BitmapType::Uncompressed => {
            let len = usize::from(header.height) * usize::from(header.stride);
            let pixels = payload.get(..len).ok_or(BitmapError::TruncatedStream {
                expected: len,
                decoded: payload.len(),
            })?;
            Ok(pixels.to_vec())
        }
        BitmapType::Compressed => rle::decode_rle(payload, header.pixel_count()),
    }
}

/// A decoded bitmap: header plus palette indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Header as stored
    pub header: BitmapHeader,
    /// Palette indices, rows `header.row_stride()` bytes apart
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Decode a whole bitmap block
    pub fn parse(block: &[u8]) -> BitmapResult<Self> {
        let header = BitmapHeader::parse(block)?;
        let pixels = decode_bitmap(&header, &block[BITMAP_HEADER_SIZE..])?;
        trace!(
            "Decoded {:?} bitmap {}x{} ({} bytes)",
            header.bitmap_type,
            header.width,
            header.height,
            pixels.len()
        );
        Ok(Self { header, pixels })
    }

    /// Palette embedded in `block`, if the header points at one
    pub fn private_palette(&self, block: &[u8]) -> BitmapResult<Option<Palette>> {
        if self.header.palette_offset == 0 {
            return Ok(None);
        }
        let start = self.header.palette_offset as usize + EMBEDDED_PALETTE_PREFIX;
        let bytes = block.get(start..).unwrap_or_default();
        Ok(Some(decode_palette(bytes)?))
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.header.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.header.height
    }

    /// Anchor rectangle from the header
    pub fn anchor(&self) -> AnchorRect {
        self.header.anchor()
    }

    /// Palette index at `(x, y)`, or `None` outside the image
    pub fn pixel(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.header.width || y >= self.header.height {
            return None;
        }
        let offset = usize::from(y) * self.header.row_stride() + usize::from(x);
        self.pixels.get(offset).copied()
    }

    /// Expand to `width * height * 4` RGBA bytes.
    ///
    /// Index 0 is transparent when the header's transparency flag is set.
    pub fn to_rgba(&self, palette: &Palette) -> Vec<u8> {
        let transparent = self.header.is_transparent();
        let mut out =
            Vec::with_capacity(usize::from(self.header.width) * usize::from(self.header.height) * 4);
        for y in 0..self.header.height {
            for x in 0..self.header.width {
                let index = self.pixel(x, y).unwrap_or(0);
                out.extend_from_slice(&palette.to_rgba(index, transparent));
            }
        }
        out
    }
}
