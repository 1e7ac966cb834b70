//! Block directories of multi-block chunks
//!
//! A `Blocks*` chunk starts with `u16 count` and `count + 1` `i32` offsets
//! measured from the start of the chunk. Block `i` spans
//! `offset[i]..offset[i + 1]`. The directory itself is never compressed; for
//! compressed chunks the offsets describe the chunk as it would look after
//! decompression.

use std::ops::Range;

use crate::cursor::ByteCursor;

use super::directory::ChunkId;
use super::error::{ArchiveError, ArchiveResult};

/// Parsed block offset table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDirectory {
    offsets: Vec<usize>,
}

impl BlockDirectory {
    /// Parse the block directory at the start of a chunk
    pub fn parse(id: ChunkId, data: &[u8]) -> ArchiveResult<Self> {
        let mut cursor = ByteCursor::new(data);
        let count = cursor
            .read_u16()
            .map_err(|e| ArchiveError::corrupt(format!("block directory of chunk {id}: {e}")))?;

        let mut offsets = Vec::with_capacity(usize::from(count) + 1);
        for index in 0..=usize::from(count) {
            let raw = cursor
                .read_i32()
                .map_err(|e| ArchiveError::corrupt(format!("block directory of chunk {id}: {e}")))?;
            let offset = usize::try_from(raw).map_err(|_| {
                ArchiveError::corrupt(format!("chunk {id} block offset {index} is negative ({raw})"))
            })?;
            if offsets.last().is_some_and(|&previous| offset < previous) {
                return Err(ArchiveError::corrupt(format!(
                    "chunk {id} block offsets decrease at index {index}"
                )));
            }
            offsets.push(offset);
        }

        Ok(Self { offsets })
    }

    /// Number of blocks
    pub fn count(&self) -> u16 {
        // parse reads count + 1 offsets from a u16 count
        (self.offsets.len() - 1) as u16
    }

    /// Offset of the first block
    pub fn start(&self) -> usize {
        self.offsets[0]
    }

    /// Offset one past the last block
    pub fn end(&self) -> usize {
        self.offsets[self.offsets.len() - 1]
    }

    /// Total payload bytes covered by all blocks
    pub fn payload_len(&self) -> usize {
        self.end() - self.start()
    }

    /// Range of block `index` relative to the chunk start
    pub fn block_range(&self, id: ChunkId, index: u16) -> ArchiveResult<Range<usize>> {
        let i = usize::from(index);
        if i + 1 >= self.offsets.len() {
            return Err(ArchiveError::BlockIndexOutOfRange {
                id,
                index,
                count: self.count(),
            });
        }
        Ok(self.offsets[i]..self.offsets[i + 1])
    }

    /// Ranges of all blocks relative to the chunk start
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.offsets.windows(2).map(|pair| pair[0]..pair[1])
    }
}

/// Slice `range` out of `data`, failing if it runs off the end
pub fn slice_block(id: ChunkId, data: &[u8], range: Range<usize>) -> ArchiveResult<&[u8]> {
    let len = data.len();
    data.get(range.clone()).ok_or_else(|| {
        ArchiveError::corrupt(format!(
            "chunk {id} block {}..{} lies outside its {len} data bytes",
            range.start, range.end
        ))
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::block_chunk;

    const ID: ChunkId = ChunkId(42);

    #[test]
    fn test_parse_block_directory() {
        let data = block_chunk(&[&b"ab"[..], &b""[..], &b"cde"[..]]);
        let blocks = BlockDirectory::parse(ID, &data).unwrap();

        assert_eq!(blocks.count(), 3);
        // 2 + 4 * 4 bytes of directory
        assert_eq!(blocks.start(), 18);
        assert_eq!(blocks.end(), 23);
        assert_eq!(blocks.payload_len(), 5);
        assert_eq!(blocks.block_range(ID, 2).unwrap(), 20..23);

        let slices: Vec<&[u8]> = blocks
            .ranges()
            .map(|r| slice_block(ID, &data, r).unwrap())
            .collect();
        assert_eq!(slices, vec![&b"ab"[..], &b""[..], &b"cde"[..]]);
    }

    #[test]
    fn test_block_index_out_of_range() {
        let data = block_chunk(&[&b"ab"[..], &b"cd"[..]]);
        let blocks = BlockDirectory::parse(ID, &data).unwrap();

        let err = blocks.block_range(ID, 2).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::BlockIndexOutOfRange {
                index: 2,
                count: 2,
                ..
            }
        ));
        assert!(blocks.block_range(ID, u16::MAX).is_err());
    }

    #[test]
    fn test_empty_directory() {
        let data = block_chunk(&[]);
        let blocks = BlockDirectory::parse(ID, &data).unwrap();
        assert_eq!(blocks.count(), 0);
        assert!(blocks.block_range(ID, 0).is_err());
        assert_eq!(blocks.ranges().count(), 0);
    }

    #[test]
    fn test_decreasing_offsets() {
        let mut data = Vec::new();
        data.extend_from_slice(&2u16.to_le_bytes());
        for offset in [14i32, 20, 16] {
            data.extend_from_slice(&offset.to_le_bytes());
        }
        data.resize(24, 0);
        assert!(matches!(
            BlockDirectory::parse(ID, &data),
            Err(ArchiveError::DirectoryCorrupt { .. })
        ));
    }

    #[test]
    fn test_negative_offset() {
        let mut data = Vec::new();
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&(-1i32).to_le_bytes());
        data.extend_from_slice(&4i32.to_le_bytes());
        assert!(matches!(
            BlockDirectory::parse(ID, &data),
            Err(ArchiveError::DirectoryCorrupt { .. })
        ));
    }

    #[test]
    fn test_truncated_directory() {
        // Count of 3 needs 16 bytes of offsets
        let data = [3, 0, 10, 0, 0, 0];
        assert!(matches!(
            BlockDirectory::parse(ID, &data),
            Err(ArchiveError::DirectoryCorrupt { .. })
        ));
    }

    #[test]
    fn test_block_outside_data() {
        let data = block_chunk(&[&b"abcd"[..]]);
        let blocks = BlockDirectory::parse(ID, &data).unwrap();
        let range = blocks.block_range(ID, 0).unwrap();
        assert!(slice_block(ID, &data[..data.len() - 1], range).is_err());
    }
}
