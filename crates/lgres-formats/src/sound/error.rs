//! Sound effect error types

use thiserror::Error;

use crate::cursor::UnexpectedEof;

/// Errors raised while flattening a sound effect to PCM
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoundError {
    /// Magic, version check or header length is wrong
    #[error("invalid sound header: {0}")]
    InvalidSoundHeader(String),

    /// Block type byte outside 0..=9
    #[error("unknown sound block type {block_type} at offset {offset:#x}")]
    UnknownBlockType {
        /// Type byte
        block_type: u8,
        /// Offset of the type byte
        offset: usize,
    },

    /// Stream or terminator reached inside a repeat loop
    #[error("repeat starting at offset {offset:#x} has no matching repeat end")]
    UnterminatedRepeat {
        /// Offset of the RepeatStart block
        offset: usize,
    },

    /// Repeat loops nested deeper than the decoder allows
    #[error("repeat loops nested deeper than {0} levels")]
    RepeatTooDeep(usize),

    /// PCM output would exceed the size limit
    #[error("sound output exceeds {limit} bytes")]
    OutputTooLarge {
        /// The limit that was hit
        limit: usize,
    },

    /// A block body is shorter than its fields require
    #[error("truncated sound block: {0}")]
    Truncated(#[from] UnexpectedEof),
}

/// Result type for sound operations
pub type SoundResult<T> = Result<T, SoundError>;
