//! Error types for archive operations

use thiserror::Error;

use super::ChunkId;
use crate::compression::CompressionError;

/// Archive operation result type
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors raised while opening an archive or reading its chunks
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// File does not start with the LG Res signature
    #[error("Bad header: expected \"LG Res File v2\\r\\n\" signature")]
    BadHeader,

    /// Chunk or block directory is inconsistent with the file
    #[error("Directory corrupt: {reason}")]
    DirectoryCorrupt {
        /// What was wrong with it
        reason: String,
    },

    /// No chunk with this id exists in the archive
    #[error("Chunk not found: {0}")]
    ChunkNotFound(ChunkId),

    /// A flat uncompressed chunk whose packed and unpacked sizes differ
    #[error("Length mismatch in chunk {id}: packed {packed} bytes, unpacked {unpacked} bytes")]
    LengthMismatch {
        /// Chunk id
        id: ChunkId,
        /// Packed length from the directory
        packed: u32,
        /// Unpacked length from the directory
        unpacked: u32,
    },

    /// Block index is not below the chunk's block count
    #[error("Block index {index} out of range for chunk {id} with {count} blocks")]
    BlockIndexOutOfRange {
        /// Chunk id
        id: ChunkId,
        /// Requested block
        index: u16,
        /// Blocks in the chunk
        count: u16,
    },

    /// Decompressing a chunk failed
    #[error("Chunk {id} failed to decompress: {source}")]
    Compression {
        /// Chunk id
        id: ChunkId,
        /// Underlying decompression error
        #[source]
        source: CompressionError,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::DirectoryCorrupt {
            reason: reason.into(),
        }
    }

    /// Whether the error describes a damaged file rather than a bad request
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::BadHeader
                | Self::DirectoryCorrupt { .. }
                | Self::LengthMismatch { .. }
                | Self::Compression { .. }
        )
    }
}
