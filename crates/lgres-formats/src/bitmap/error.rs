//! Bitmap error types

use thiserror::Error;

use crate::palette::PaletteError;

/// Errors raised while decoding a bitmap
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitmapError {
    /// Block is shorter than the 28-byte header
    #[error("bitmap header truncated: need 28 bytes, have {0}")]
    TruncatedHeader(usize),

    /// Header type byte is neither uncompressed (4) nor compressed (5)
    #[error("unknown bitmap type {0}")]
    UnknownBitmapType(u8),

    /// `0x80` subcommand with a parameter this decoder does not know.
    ///
    /// Every `p2` value currently maps to a command, so the decoder never
    /// produces this; it stays for callers matching the full taxonomy.
    #[error("unknown RLE subcommand {0:#04x}")]
    UnknownSubcommand(u8),

    /// Pixel data ended before the image was complete
    #[error("bitmap data truncated: expected {expected} pixels, decoded {decoded}")]
    TruncatedStream {
        /// Pixels the header promises
        expected: usize,
        /// Pixels produced before input ran out
        decoded: usize,
    },

    /// Embedded palette could not be read
    #[error("embedded palette: {0}")]
    Palette(#[from] PaletteError),
}

/// Result type for bitmap operations
pub type BitmapResult<T> = Result<T, BitmapError>;
