//! Archive writer shared by the integration tests

#![allow(dead_code)]

use lgres_formats::archive::{DIRECTORY_POINTER_OFFSET, SIGNATURE, align4};
use lgres_formats::compression::{CODE_BITS, END_OF_STREAM};
use lgres_formats::{ChunkId, ChunkType, ContentType};

/// Pack 14-bit codes MSB-first
pub fn pack_codes(codes: &[u16]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut accumulator: u32 = 0;
    let mut bits = 0;
    for &code in codes {
        accumulator = (accumulator << CODE_BITS) | u32::from(code & 0x3FFF);
        bits += CODE_BITS;
        while bits >= 8 {
            bits -= 8;
            out.push((accumulator >> bits) as u8);
        }
        accumulator &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push((accumulator << (8 - bits)) as u8);
    }
    out
}

/// Compressed stream that spells `bytes` with literal codes only
pub fn literal_stream(bytes: &[u8]) -> Vec<u8> {
    let mut codes: Vec<u16> = bytes.iter().map(|&b| u16::from(b)).collect();
    codes.push(END_OF_STREAM);
    pack_codes(&codes)
}

/// Block directory for `blocks`, without the block bytes
pub fn block_directory(blocks: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(blocks.len() as u16).to_le_bytes());
    let mut offset = 2 + 4 * (blocks.len() + 1);
    out.extend_from_slice(&(offset as i32).to_le_bytes());
    for block in blocks {
        offset += block.len();
        out.extend_from_slice(&(offset as i32).to_le_bytes());
    }
    out
}

struct Chunk {
    id: u16,
    chunk_type: ChunkType,
    content_type: ContentType,
    length_unpacked: u32,
    packed: Vec<u8>,
}

/// Writes archives the way the game's packer lays them out
#[derive(Default)]
pub struct ResWriter {
    chunks: Vec<Chunk>,
}

impl ResWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flat(mut self, id: u16, content_type: ContentType, data: &[u8]) -> Self {
        self.chunks.push(Chunk {
            id,
            chunk_type: ChunkType::FlatUncompressed,
            content_type,
            length_unpacked: data.len() as u32,
            packed: data.to_vec(),
        });
        self
    }

    pub fn flat_compressed(mut self, id: u16, content_type: ContentType, data: &[u8]) -> Self {
        self.chunks.push(Chunk {
            id,
            chunk_type: ChunkType::FlatCompressed,
            content_type,
            length_unpacked: data.len() as u32,
            packed: literal_stream(data),
        });
        self
    }

    pub fn blocks(mut self, id: u16, content_type: ContentType, blocks: &[&[u8]]) -> Self {
        let mut packed = block_directory(blocks);
        for block in blocks {
            packed.extend_from_slice(block);
        }
        self.chunks.push(Chunk {
            id,
            chunk_type: ChunkType::BlocksUncompressed,
            content_type,
            length_unpacked: packed.len() as u32,
            packed,
        });
        self
    }

    pub fn blocks_compressed(mut self, id: u16, content_type: ContentType, blocks: &[&[u8]]) -> Self {
        let mut packed = block_directory(blocks);
        let payload: Vec<u8> = blocks.concat();
        let length_unpacked = (packed.len() + payload.len()) as u32;
        packed.extend_from_slice(&literal_stream(&payload));
        self.chunks.push(Chunk {
            id,
            chunk_type: ChunkType::BlocksCompressed,
            content_type,
            length_unpacked,
            packed,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let initial_offset = DIRECTORY_POINTER_OFFSET + 4;
        let mut out = vec![0u8; initial_offset];
        out[..SIGNATURE.len()].copy_from_slice(&SIGNATURE);

        for chunk in &self.chunks {
            out.extend_from_slice(&chunk.packed);
            out.resize(align4(out.len() as u64) as usize, 0);
        }

        let directory_offset = out.len() as i32;
        out[DIRECTORY_POINTER_OFFSET..initial_offset]
            .copy_from_slice(&directory_offset.to_le_bytes());

        out.extend_from_slice(&(self.chunks.len() as u16).to_le_bytes());
        out.extend_from_slice(&(initial_offset as i32).to_le_bytes());
        for chunk in &self.chunks {
            out.extend_from_slice(&chunk.id.to_le_bytes());
            out.extend_from_slice(&chunk.length_unpacked.to_le_bytes()[..3]);
            out.push(chunk.chunk_type.to_byte());
            out.extend_from_slice(&(chunk.packed.len() as u32).to_le_bytes()[..3]);
            out.push(chunk.content_type.to_byte());
        }
        out
    }
}

pub fn id(raw: u16) -> ChunkId {
    ChunkId(raw)
}

/// Bitmap block: 28-byte header followed by `payload`
pub fn bitmap_block(compressed: bool, width: u16, height: u16, flags: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 28];
    out[4] = if compressed { 5 } else { 4 };
    out[6..8].copy_from_slice(&flags.to_le_bytes());
    out[8..10].copy_from_slice(&width.to_le_bytes());
    out[10..12].copy_from_slice(&height.to_le_bytes());
    out[12..14].copy_from_slice(&width.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Sound chunk with one sound-data block and a terminator
pub fn sound_chunk(divisor: u8, pcm: &[u8]) -> Vec<u8> {
    let version: u16 = 0x010A;
    let mut out = Vec::new();
    out.extend_from_slice(b"Creative Voice File\x1A");
    out.extend_from_slice(&26u16.to_le_bytes());
    out.extend_from_slice(&version.to_le_bytes());
    out.extend_from_slice(&(!version).wrapping_add(0x1234).to_le_bytes());
    out.push(1);
    out.extend_from_slice(&((pcm.len() + 2) as u32).to_le_bytes()[..3]);
    out.extend_from_slice(&[divisor, 0]);
    out.extend_from_slice(pcm);
    out.push(0);
    out
}
