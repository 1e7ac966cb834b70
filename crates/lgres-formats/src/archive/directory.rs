//! Chunk directory entries and their type tags

use std::fmt;

use super::error::{ArchiveError, ArchiveResult};
use super::header::{DirectoryRecord, align4};

/// Identifier of a chunk within one archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub u16);

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#06x})", self.0, self.0)
    }
}

impl From<u16> for ChunkId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// How a chunk is stored: compressed or not, and whether it holds blocks.
///
/// Bit 0 of the tag marks compression, bit 1 marks a block directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkType {
    /// Raw bytes
    FlatUncompressed,
    /// One compressed stream
    FlatCompressed,
    /// Block directory followed by raw blocks
    BlocksUncompressed,
    /// Block directory followed by one compressed stream of blocks
    BlocksCompressed,
}

impl ChunkType {
    /// Decode the on-disk tag
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::FlatUncompressed),
            1 => Some(Self::FlatCompressed),
            2 => Some(Self::BlocksUncompressed),
            3 => Some(Self::BlocksCompressed),
            _ => None,
        }
    }

    /// On-disk tag
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::FlatUncompressed => 0,
            Self::FlatCompressed => 1,
            Self::BlocksUncompressed => 2,
            Self::BlocksCompressed => 3,
        }
    }

    /// Whether the payload goes through the dictionary decompressor
    pub const fn is_compressed(self) -> bool {
        matches!(self, Self::FlatCompressed | Self::BlocksCompressed)
    }

    /// Whether the payload starts with a block directory
    pub const fn has_blocks(self) -> bool {
        matches!(self, Self::BlocksUncompressed | Self::BlocksCompressed)
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FlatUncompressed => "flat",
            Self::FlatCompressed => "flat-compressed",
            Self::BlocksUncompressed => "blocks",
            Self::BlocksCompressed => "blocks-compressed",
        };
        f.write_str(name)
    }
}

/// Semantic kind of a chunk's payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// 256-entry RGB palette
    Palette,
    /// String table, one string per block
    Text,
    /// Palette-indexed bitmap, one image per block
    Bitmap,
    /// Bitmap font
    Font,
    /// Video clip
    Video,
    /// VOC-style sound effect
    Sound,
    /// 3D model bytecode
    Model,
    /// Movie
    Movie,
    /// Level map data
    Map,
    /// Any tag this crate does not know
    Other(u8),
}

impl ContentType {
    /// Decode the on-disk tag. Unknown tags are preserved as [`ContentType::Other`].
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::Palette,
            0x01 => Self::Text,
            0x02 => Self::Bitmap,
            0x03 => Self::Font,
            0x04 => Self::Video,
            0x07 => Self::Sound,
            0x0F => Self::Model,
            0x11 => Self::Movie,
            0x30 => Self::Map,
            other => Self::Other(other),
        }
    }

    /// On-disk tag
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Palette => 0x00,
            Self::Text => 0x01,
            Self::Bitmap => 0x02,
            Self::Font => 0x03,
            Self::Video => 0x04,
            Self::Sound => 0x07,
            Self::Model => 0x0F,
            Self::Movie => 0x11,
            Self::Map => 0x30,
            Self::Other(byte) => byte,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Palette => f.write_str("palette"),
            Self::Text => f.write_str("text"),
            Self::Bitmap => f.write_str("bitmap"),
            Self::Font => f.write_str("font"),
            Self::Video => f.write_str("video"),
            Self::Sound => f.write_str("sound"),
            Self::Model => f.write_str("model"),
            Self::Movie => f.write_str("movie"),
            Self::Map => f.write_str("map"),
            Self::Other(byte) => write!(f, "other({byte:#04x})"),
        }
    }
}

/// Directory entry for one chunk, with its resolved data offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDirectoryEntry {
    /// Chunk id
    pub id: ChunkId,
    /// Length after decompression
    pub length_unpacked: u32,
    /// Length as stored in the file
    pub length_packed: u32,
    /// Storage layout
    pub chunk_type: ChunkType,
    /// Payload kind
    pub content_type: ContentType,
    /// Absolute file offset of the packed bytes
    pub data_offset: u64,
}

impl ChunkDirectoryEntry {
    /// Byte range of the packed data within the file
    pub fn packed_range(&self) -> std::ops::Range<u64> {
        self.data_offset..self.data_offset + u64::from(self.length_packed)
    }
}

/// Resolve raw records into entries, accumulating 4-byte aligned offsets.
///
/// Fails on unknown chunk types. Duplicate ids and file bounds are checked
/// by the caller, which owns the lookup table and the file length.
pub fn resolve_entries(
    initial_offset: u64,
    records: &[DirectoryRecord],
) -> ArchiveResult<Vec<ChunkDirectoryEntry>> {
    let mut offset = initial_offset;
    let mut entries = Vec::with_capacity(records.len());

    for record in records {
        let chunk_type = ChunkType::from_byte(record.chunk_type).ok_or_else(|| {
            ArchiveError::corrupt(format!(
                "chunk {} has unknown chunk type {:#04x}",
                ChunkId(record.id),
                record.chunk_type
            ))
        })?;

        entries.push(ChunkDirectoryEntry {
            id: ChunkId(record.id),
            length_unpacked: record.length_unpacked,
            length_packed: record.length_packed,
            chunk_type,
            content_type: ContentType::from_byte(record.content_type),
            data_offset: offset,
        });

        offset += align4(u64::from(record.length_packed));
    }

    Ok(entries)
}
