//! LG Res archive container
//!
//! An archive is a flat file with a 16-byte signature, a pointer to a chunk
//! directory and the chunk payloads packed back to back on 4-byte
//! boundaries. Each chunk is identified by a 16-bit id and may be
//! compressed and/or split into blocks.
//!
//! # Chunk Layout
//!
//! | Chunk type           | Stored bytes                                   |
//! |----------------------|------------------------------------------------|
//! | `FlatUncompressed`   | payload                                        |
//! | `FlatCompressed`     | compressed payload                             |
//! | `BlocksUncompressed` | block directory, blocks                        |
//! | `BlocksCompressed`   | block directory, compressed stream of blocks   |
//!
//! # Example
//!
//! ```no_run
//! use lgres_formats::archive::{Archive, ChunkId};
//!
//! let archive = Archive::open("citmat.res")?;
//! for entry in archive.entries() {
//!     println!("{} {} {} bytes", entry.id, entry.content_type, entry.length_unpacked);
//! }
//! let frames = archive.get_chunk_datas(ChunkId(1350))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod blocks;
mod directory;
mod error;
mod header;

pub use blocks::BlockDirectory;
pub use directory::{ChunkDirectoryEntry, ChunkId, ChunkType, ContentType};
pub use error::{ArchiveError, ArchiveResult};
pub use header::{DIRECTORY_POINTER_OFFSET, SIGNATURE, align4};

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, trace};

use crate::compression::decompress;

use blocks::slice_block;
use header::{FileHeader, RawDirectory};

/// An opened archive: the whole file plus its chunk directory
///
/// The byte source is anything that derefs to a byte slice, so an archive
/// can own a `Vec<u8>` or borrow a buffer mapped elsewhere.
#[derive(Debug, Clone)]
pub struct Archive<B = Vec<u8>> {
    data: B,
    entries: Vec<ChunkDirectoryEntry>,
    index: HashMap<ChunkId, usize>,
}

impl Archive<Vec<u8>> {
    /// Read a whole archive file into memory and parse it
    pub fn open(path: impl AsRef<Path>) -> ArchiveResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        debug!("Read {} bytes from {}", data.len(), path.display());
        Self::from_bytes(data)
    }
}

impl<B: AsRef<[u8]>> Archive<B> {
    /// Parse the header and chunk directory of an in-memory archive
    pub fn from_bytes(data: B) -> ArchiveResult<Self> {
        let bytes = data.as_ref();
        let header = FileHeader::parse(bytes)?;
        // Checked non-negative by FileHeader::parse
        let directory_offset = header.directory_offset as usize;
        let raw = RawDirectory::parse(bytes, directory_offset)?;
        let entries = directory::resolve_entries(raw.initial_offset as u64, &raw.records)?;

        let file_len = bytes.len() as u64;
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.id, position).is_some() {
                return Err(ArchiveError::corrupt(format!(
                    "duplicate chunk id {}",
                    entry.id
                )));
            }
            if entry.packed_range().end > file_len {
                return Err(ArchiveError::corrupt(format!(
                    "chunk {} data {:#x}..{:#x} runs past end of file ({file_len:#x} bytes)",
                    entry.id,
                    entry.packed_range().start,
                    entry.packed_range().end
                )));
            }
            trace!(
                "Chunk {} {} {} at {:#x}: {} packed, {} unpacked",
                entry.id,
                entry.chunk_type,
                entry.content_type,
                entry.data_offset,
                entry.length_packed,
                entry.length_unpacked
            );
        }

        debug!(
            "Opened archive with {} chunks, directory at {:#x}",
            entries.len(),
            directory_offset
        );

        Ok(Self {
            data,
            entries,
            index,
        })
    }

    /// Directory entries in file order
    pub fn entries(&self) -> &[ChunkDirectoryEntry] {
        &self.entries
    }

    /// Number of chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no chunks
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a chunk with this id exists
    pub fn contains(&self, id: ChunkId) -> bool {
        self.index.contains_key(&id)
    }

    /// Directory entry for a chunk
    pub fn get_chunk_info(&self, id: ChunkId) -> Option<&ChunkDirectoryEntry> {
        self.index.get(&id).map(|&i| &self.entries[i])
    }

    fn entry(&self, id: ChunkId) -> ArchiveResult<&ChunkDirectoryEntry> {
        self.get_chunk_info(id).ok_or(ArchiveError::ChunkNotFound(id))
    }

    /// Packed bytes of a chunk exactly as stored
    pub fn raw_chunk(&self, id: ChunkId) -> ArchiveResult<&[u8]> {
        let entry = self.entry(id)?;
        Ok(self.packed_bytes(entry))
    }

    fn packed_bytes(&self, entry: &ChunkDirectoryEntry) -> &[u8] {
        let range = entry.packed_range();
        // Bounds were validated when the directory was parsed
        &self.data.as_ref()[range.start as usize..range.end as usize]
    }

    /// Number of blocks in a chunk; flat chunks have one
    pub fn block_count(&self, id: ChunkId) -> ArchiveResult<u16> {
        let entry = self.entry(id)?;
        if entry.chunk_type.has_blocks() {
            Ok(BlockDirectory::parse(id, self.packed_bytes(entry))?.count())
        } else {
            Ok(1)
        }
    }

    /// Decoded bytes of one block of a chunk.
    ///
    /// Flat chunks only have block 0. Compressed block chunks are
    /// decompressed in full, so callers wanting several blocks should use
    /// [`Archive::get_chunk_datas`].
    pub fn get_chunk_data(&self, id: ChunkId, block_index: u16) -> ArchiveResult<Vec<u8>> {
        let entry = self.entry(id)?;
        let raw = self.packed_bytes(entry);

        match entry.chunk_type {
            ChunkType::FlatUncompressed | ChunkType::FlatCompressed => {
                if block_index > 0 {
                    return Err(ArchiveError::BlockIndexOutOfRange {
                        id,
                        index: block_index,
                        count: 1,
                    });
                }
                Self::flat_data(entry, raw)
            }
            ChunkType::BlocksUncompressed => {
                let blocks = BlockDirectory::parse(id, raw)?;
                let range = blocks.block_range(id, block_index)?;
                Ok(slice_block(id, raw, range)?.to_vec())
            }
            ChunkType::BlocksCompressed => {
                let blocks = BlockDirectory::parse(id, raw)?;
                let range = blocks.block_range(id, block_index)?;
                let payload = Self::expand_blocks(entry, raw, &blocks)?;
                let start = blocks.start();
                Ok(slice_block(id, &payload, range.start - start..range.end - start)?.to_vec())
            }
        }
    }

    /// Decoded bytes of every block of a chunk, one element for flat chunks
    pub fn get_chunk_datas(&self, id: ChunkId) -> ArchiveResult<Vec<Vec<u8>>> {
        let entry = self.entry(id)?;
        let raw = self.packed_bytes(entry);

        match entry.chunk_type {
            ChunkType::FlatUncompressed | ChunkType::FlatCompressed => {
                Ok(vec![Self::flat_data(entry, raw)?])
            }
            ChunkType::BlocksUncompressed => {
                let blocks = BlockDirectory::parse(id, raw)?;
                blocks
                    .ranges()
                    .map(|range| slice_block(id, raw, range).map(<[u8]>::to_vec))
                    .collect()
            }
            ChunkType::BlocksCompressed => {
                let blocks = BlockDirectory::parse(id, raw)?;
                let payload = Self::expand_blocks(entry, raw, &blocks)?;
                let start = blocks.start();
                blocks
                    .ranges()
                    .map(|range| {
                        slice_block(id, &payload, range.start - start..range.end - start)
                            .map(<[u8]>::to_vec)
                    })
                    .collect()
            }
        }
    }

    fn flat_data(entry: &ChunkDirectoryEntry, raw: &[u8]) -> ArchiveResult<Vec<u8>> {
        if entry.chunk_type.is_compressed() {
            return decompress(raw, entry.length_unpacked as usize).map_err(|source| {
                ArchiveError::Compression {
                    id: entry.id,
                    source,
                }
            });
        }

        if entry.length_packed != entry.length_unpacked {
            return Err(ArchiveError::LengthMismatch {
                id: entry.id,
                packed: entry.length_packed,
                unpacked: entry.length_unpacked,
            });
        }
        Ok(raw.to_vec())
    }

    /// Decompress the block stream that follows the directory of a
    /// compressed block chunk. The result starts at `blocks.start()`.
    fn expand_blocks(
        entry: &ChunkDirectoryEntry,
        raw: &[u8],
        blocks: &BlockDirectory,
    ) -> ArchiveResult<Vec<u8>> {
        let id = entry.id;
        if blocks.end() > entry.length_unpacked as usize {
            return Err(ArchiveError::corrupt(format!(
                "chunk {id} blocks end at {:#x}, past its {} unpacked bytes",
                blocks.end(),
                entry.length_unpacked
            )));
        }

        let stream = raw.get(blocks.start()..).ok_or_else(|| {
            ArchiveError::corrupt(format!(
                "chunk {id} first block offset {:#x} is past its {} packed bytes",
                blocks.start(),
                raw.len()
            ))
        })?;

        trace!(
            "Expanding {} blocks of chunk {} ({} compressed bytes)",
            blocks.count(),
            id,
            stream.len()
        );

        decompress(stream, blocks.payload_len())
            .map_err(|source| ArchiveError::Compression { id, source })
    }
}
