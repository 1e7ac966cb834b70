//! Crate-level error type

use thiserror::Error;

use crate::archive::{ArchiveError, ChunkId};
use crate::bitmap::BitmapError;
use crate::compression::CompressionError;
use crate::font::FontError;
use crate::palette::PaletteError;
use crate::sound::SoundError;

/// Any error raised while reading an archive or decoding its chunks
#[derive(Debug, Error)]
pub enum Error {
    /// Archive container error
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Decompression error
    #[error(transparent)]
    Compression(#[from] CompressionError),

    /// Bitmap decoding error
    #[error(transparent)]
    Bitmap(#[from] BitmapError),

    /// Palette decoding error
    #[error(transparent)]
    Palette(#[from] PaletteError),

    /// Sound decoding error
    #[error(transparent)]
    Sound(#[from] SoundError),

    /// Font decoding error
    #[error(transparent)]
    Font(#[from] FontError),

    /// Chunk has a content type with no decoder
    #[error("chunk {id} has unknown content type {content_type:#04x}")]
    UnknownContentType {
        /// Chunk id
        id: ChunkId,
        /// Raw content type byte
        content_type: u8,
    },
}

/// Result type using the crate-level [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
