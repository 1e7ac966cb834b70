//! File header and chunk directory records
//!
//! ```text
//! 0x00  [u8; 16]  "LG Res File v2\r\n"
//! 0x10  ...       free-form comment text
//! 0x7C  i32       offset of the chunk directory
//!
//! directory:
//!   u16           chunk count
//!   i32           offset of the first chunk's data
//!   count x 10-byte records
//! ```

use binrw::BinRead;
use tracing::debug;

use super::error::{ArchiveError, ArchiveResult};

/// Signature every archive starts with
pub const SIGNATURE: [u8; 16] = *b"LG Res File v2\r\n";

/// File offset of the directory pointer
pub const DIRECTORY_POINTER_OFFSET: usize = 0x7C;

/// Fixed file header up to and including the directory pointer
#[derive(Debug, Clone, BinRead)]
#[br(little)]
pub struct FileHeader {
    /// File signature
    pub signature: [u8; 16],

    /// Absolute offset of the chunk directory
    #[br(pad_before = 0x6C)] // comment text between signature and pointer
    pub directory_offset: i32,
}

impl FileHeader {
    /// Parse and validate the header at the start of `data`
    pub fn parse(data: &[u8]) -> ArchiveResult<Self> {
        if data.get(..SIGNATURE.len()) != Some(&SIGNATURE[..]) {
            return Err(ArchiveError::BadHeader);
        }

        let header = Self::read(&mut std::io::Cursor::new(data))
            .map_err(|e| ArchiveError::corrupt(format!("file header: {e}")))?;

        if header.directory_offset < 0 {
            return Err(ArchiveError::corrupt(format!(
                "negative directory offset {}",
                header.directory_offset
            )));
        }

        Ok(header)
    }
}

/// One 10-byte chunk directory record as stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead)]
#[br(little)]
pub struct DirectoryRecord {
    /// Chunk id
    pub id: u16,
    /// Length after decompression
    #[br(map = |x: [u8; 3]| u32::from_le_bytes([x[0], x[1], x[2], 0]))]
    pub length_unpacked: u32,
    /// Raw chunk type byte
    pub chunk_type: u8,
    /// Length as stored in the file
    #[br(map = |x: [u8; 3]| u32::from_le_bytes([x[0], x[1], x[2], 0]))]
    pub length_packed: u32,
    /// Raw content type byte
    pub content_type: u8,
}

/// Chunk directory as stored on disk
#[derive(Debug, Clone, BinRead)]
#[br(little)]
pub struct RawDirectory {
    /// Number of records
    pub count: u16,
    /// Offset of the first chunk's data
    pub initial_offset: i32,
    /// Records in file order
    #[br(count = count)]
    pub records: Vec<DirectoryRecord>,
}

impl RawDirectory {
    /// Parse the directory found at `offset`
    pub fn parse(data: &[u8], offset: usize) -> ArchiveResult<Self> {
        let Some(tail) = data.get(offset..) else {
            return Err(ArchiveError::corrupt(format!(
                "directory offset {offset:#x} is past end of file ({:#x} bytes)",
                data.len()
            )));
        };

        let directory = Self::read(&mut std::io::Cursor::new(tail))
            .map_err(|e| ArchiveError::corrupt(format!("chunk directory at {offset:#x}: {e}")))?;

        debug!(
            "Chunk directory at {:#x}: {} records, data from {:#x}",
            offset, directory.count, directory.initial_offset
        );

        if directory.initial_offset < 0 {
            return Err(ArchiveError::corrupt(format!(
                "negative initial data offset {}",
                directory.initial_offset
            )));
        }

        Ok(directory)
    }
}

/// Round `value` up to the next multiple of 4
pub const fn align4(value: u64) -> u64 {
    (value + 3) & !3
}
