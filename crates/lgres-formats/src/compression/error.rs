//! Compression error types

use thiserror::Error;

/// Errors raised while expanding a compressed chunk
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressionError {
    /// The stream ended before producing the expected number of bytes
    #[error("truncated stream: expected {expected} bytes, decoded {actual}")]
    TruncatedStream {
        /// Length recorded in the chunk directory
        expected: usize,
        /// Length actually decoded
        actual: usize,
    },

    /// A code referenced a dictionary word that does not exist yet
    #[error("corrupt dictionary: code {code:#06X} references word {word} with {registered} words registered")]
    CorruptDictionary {
        /// The offending codeword
        code: u16,
        /// Dictionary index derived from the code
        word: usize,
        /// Number of words registered when the code was read
        registered: usize,
    },

    /// An expansion would write past the expected length
    #[error("output overflow: expansion to {attempted} bytes exceeds expected {expected}")]
    OutputOverflow {
        /// Length recorded in the chunk directory
        expected: usize,
        /// Length the expansion would have produced
        attempted: usize,
    },
}

/// Result type for compression operations
pub type CompressionResult<T> = Result<T, CompressionError>;
