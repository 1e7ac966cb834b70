//! 28-byte bitmap header

use binrw::BinRead;

use super::error::{BitmapError, BitmapResult};

/// Size of the header in bytes
pub const BITMAP_HEADER_SIZE: usize = 28;

/// Pixel storage of a bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitmapType {
    /// `height * stride` raw palette indices
    Uncompressed,
    /// Run-length encoded palette indices
    Compressed,
}

impl BitmapType {
    /// Decode the header tag
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            4 => Some(Self::Uncompressed),
            5 => Some(Self::Compressed),
            _ => None,
        }
    }

    /// Header tag
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Uncompressed => 4,
            Self::Compressed => 5,
        }
    }
}

/// Anchor rectangle stored in the header, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnchorRect {
    /// Left edge
    pub left: u16,
    /// Top edge
    pub top: u16,
    /// Right edge
    pub right: u16,
    /// Bottom edge
    pub bottom: u16,
}

#[derive(BinRead)]
#[br(little)]
struct RawBitmapHeader {
    _reserved: u32,
    bitmap_type: u8,
    _pad: u8,
    flags: u16,
    width: u16,
    height: u16,
    stride: u16,
    width_shift: u8,
    height_shift: u8,
    pivot: [u16; 4],
    palette_offset: u32,
}

/// Decoded bitmap header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Pixel storage
    pub bitmap_type: BitmapType,
    /// Flag bits; bit 0 marks index 0 as transparent
    pub flags: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Bytes per row of uncompressed pixel data
    pub stride: u16,
    /// log2 of the width, used for texture wrapping
    pub width_shift: u8,
    /// log2 of the height
    pub height_shift: u8,
    /// Anchor rectangle
    pub pivot: [u16; 4],
    /// Offset of an embedded palette from the start of the block, 0 if none
    pub palette_offset: u32,
}

impl BitmapHeader {
    /// Flag marking palette index 0 as transparent
    pub const FLAG_TRANSPARENT: u16 = 0x0001;

    /// Parse the header at the start of `data`
    pub fn parse(data: &[u8]) -> BitmapResult<Self> {
        if data.len() < BITMAP_HEADER_SIZE {
            return Err(BitmapError::TruncatedHeader(data.len()));
        }
        let raw = RawBitmapHeader::read(&mut std::io::Cursor::new(data))
            .map_err(|_| BitmapError::TruncatedHeader(data.len()))?;

        let bitmap_type = BitmapType::from_byte(raw.bitmap_type)
            .ok_or(BitmapError::UnknownBitmapType(raw.bitmap_type))?;

        Ok(Self {
            bitmap_type,
            flags: raw.flags,
            width: raw.width,
            height: raw.height,
            stride: raw.stride,
            width_shift: raw.width_shift,
            height_shift: raw.height_shift,
            pivot: raw.pivot,
            palette_offset: raw.palette_offset,
        })
    }

    /// Number of pixels in the decoded image
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Bytes between the starts of two decoded rows
    pub fn row_stride(&self) -> usize {
        match self.bitmap_type {
            BitmapType::Uncompressed => usize::from(self.stride),
            BitmapType::Compressed => usize::from(self.width),
        }
    }

    /// Whether palette index 0 should be drawn transparent
    pub fn is_transparent(&self) -> bool {
        self.flags & Self::FLAG_TRANSPARENT != 0
    }

    /// Anchor rectangle
    pub fn anchor(&self) -> AnchorRect {
        let [left, top, right, bottom] = self.pivot;
        AnchorRect {
            left,
            top,
            right,
            bottom,
        }
    }
}
