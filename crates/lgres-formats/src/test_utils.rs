//! Fixture builders shared by the unit tests

use crate::archive::{
    ChunkId, ChunkType, ContentType, DIRECTORY_POINTER_OFFSET, SIGNATURE, align4,
};
use crate::bitmap::BitmapType;
use crate::compression::CODE_BITS;

/// Pack 14-bit codes MSB-first, zero-padding the final byte
pub fn pack_codes(codes: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(codes.len() * 2);
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

/// Build an uncompressed block chunk: directory followed by the blocks
pub fn block_chunk(blocks: &[&[u8]]) -> Vec<u8> {
    let header_len = 2 + 4 * (blocks.len() + 1);
    let mut out = Vec::new();
    out.extend_from_slice(&(blocks.len() as u16).to_le_bytes());

    let mut offset = header_len;
    out.extend_from_slice(&(offset as i32).to_le_bytes());
    for block in blocks {
        offset += block.len();
        out.extend_from_slice(&(offset as i32).to_le_bytes());
    }
    for block in blocks {
        out.extend_from_slice(block);
    }
    out
}

struct FixtureChunk {
    id: ChunkId,
    chunk_type: ChunkType,
    content_type: ContentType,
    length_unpacked: u32,
    packed: Vec<u8>,
}

/// In-memory archive writer
#[derive(Default)]
pub struct ArchiveFixture {
    chunks: Vec<FixtureChunk>,
}

impl ArchiveFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk with explicit storage type and unpacked length
    pub fn chunk(
        mut self,
        id: ChunkId,
        chunk_type: ChunkType,
        content_type: ContentType,
        length_unpacked: u32,
        packed: &[u8],
    ) -> Self {
        self.chunks.push(FixtureChunk {
            id,
            chunk_type,
            content_type,
            length_unpacked,
            packed: packed.to_vec(),
        });
        self
    }

    /// Add a flat uncompressed chunk
    pub fn flat(self, id: ChunkId, content_type: ContentType, data: &[u8]) -> Self {
        self.chunk(
            id,
            ChunkType::FlatUncompressed,
            content_type,
            data.len() as u32,
            data,
        )
    }

    /// Serialize: header, chunk data from 0x80, then the directory
    pub fn build(&self) -> Vec<u8> {
        let initial_offset = DIRECTORY_POINTER_OFFSET + 4;
        let mut out = vec![0u8; initial_offset];
        out[..SIGNATURE.len()].copy_from_slice(&SIGNATURE);

        for chunk in &self.chunks {
            out.extend_from_slice(&chunk.packed);
            out.resize(align4(out.len() as u64) as usize, 0);
        }

        let directory_offset = out.len();
        out[DIRECTORY_POINTER_OFFSET..initial_offset]
            .copy_from_slice(&(directory_offset as i32).to_le_bytes());

        out.extend_from_slice(&(self.chunks.len() as u16).to_le_bytes());
        out.extend_from_slice(&(initial_offset as i32).to_le_bytes());
        for chunk in &self.chunks {
            out.extend_from_slice(&chunk.id.0.to_le_bytes());
            out.extend_from_slice(&chunk.length_unpacked.to_le_bytes()[..3]);
            out.push(chunk.chunk_type.to_byte());
            out.extend_from_slice(&(chunk.packed.len() as u32).to_le_bytes()[..3]);
            out.push(chunk.content_type.to_byte());
        }
        out
    }

    /// Directory offset stored in a built archive
    pub fn directory_offset(data: &[u8]) -> usize {
        let pointer: [u8; 4] = data[DIRECTORY_POINTER_OFFSET..DIRECTORY_POINTER_OFFSET + 4]
            .try_into()
            .unwrap();
        i32::from_le_bytes(pointer) as usize
    }
}

/// 28-byte bitmap header with no flags, anchor or palette
pub fn bitmap_header(bitmap_type: BitmapType, width: u16, height: u16, stride: u16) -> Vec<u8> {
    let mut out = vec![0u8; 28];
    out[4] = bitmap_type.to_byte();
    out[8..10].copy_from_slice(&width.to_le_bytes());
    out[10..12].copy_from_slice(&height.to_le_bytes());
    out[12..14].copy_from_slice(&stride.to_le_bytes());
    out
}

/// 26-byte sound header with a correct version check
pub fn voc_header(version: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(26);
    out.extend_from_slice(b"Creative Voice File");
    out.push(0x1A);
    out.extend_from_slice(&26u16.to_le_bytes());
    out.extend_from_slice(&version.to_le_bytes());
    out.extend_from_slice(&crate::sound::version_check_for(version).to_le_bytes());
    out
}

/// Sound block stream writer
pub struct VocBuilder {
    data: Vec<u8>,
}

impl VocBuilder {
    pub fn new() -> Self {
        Self {
            data: voc_header(0x010A),
        }
    }

    fn block(mut self, block_type: u8, body: &[u8]) -> Self {
        self.data.push(block_type);
        self.data.extend_from_slice(&(body.len() as u32).to_le_bytes()[..3]);
        self.data.extend_from_slice(body);
        self
    }

    pub fn terminator(mut self) -> Self {
        self.data.push(0);
        self
    }

    pub fn sound_data(self, divisor: u8, pcm: &[u8]) -> Self {
        let mut body = vec![divisor, 0];
        body.extend_from_slice(pcm);
        self.block(1, &body)
    }

    pub fn continuation(self, pcm: &[u8]) -> Self {
        let mut body = vec![0, 0];
        body.extend_from_slice(pcm);
        self.block(2, &body)
    }

    pub fn silence(self, length_raw: u16, divisor: u8) -> Self {
        let [lo, hi] = length_raw.to_le_bytes();
        self.block(3, &[lo, hi, divisor])
    }

    pub fn marker(self, marker: u16) -> Self {
        self.block(4, &marker.to_le_bytes())
    }

    pub fn text(self, text: &str) -> Self {
        let mut body = text.as_bytes().to_vec();
        body.push(0);
        self.block(5, &body)
    }

    pub fn repeat_start(self, count_raw: u16) -> Self {
        self.block(6, &count_raw.to_le_bytes())
    }

    pub fn repeat_end(mut self) -> Self {
        self.data.push(7);
        self
    }

    pub fn extra_info(self) -> Self {
        self.block(8, &[0x00, 0xF0, 0x00, 0x01])
    }

    pub fn sound_data_new(self, pcm: &[u8]) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(&44_100u32.to_le_bytes());
        body.extend_from_slice(&[8, 1]);
        body.extend_from_slice(&0u16.to_le_bytes());
        body.extend_from_slice(&[0; 4]);
        body.extend_from_slice(pcm);
        self.block(9, &body)
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

/// Font chunk: 84-byte header, offset table at 84, strip right after it
pub fn font_chunk(
    kind: u16,
    first: u8,
    last: u8,
    offsets: &[u16],
    row_bytes: u16,
    strip: &[u8],
) -> Vec<u8> {
    let offset_table = 84u32;
    let bitmap_offset = offset_table + 2 * offsets.len() as u32;
    let height = strip.len() as u16 / row_bytes;

    let mut out = vec![0u8; 84];
    out[0..2].copy_from_slice(&kind.to_le_bytes());
    out[36..38].copy_from_slice(&u16::from(first).to_le_bytes());
    out[38..40].copy_from_slice(&u16::from(last).to_le_bytes());
    out[72..76].copy_from_slice(&offset_table.to_le_bytes());
    out[76..80].copy_from_slice(&bitmap_offset.to_le_bytes());
    out[80..82].copy_from_slice(&row_bytes.to_le_bytes());
    out[82..84].copy_from_slice(&height.to_le_bytes());
    for offset in offsets {
        out.extend_from_slice(&offset.to_le_bytes());
    }
    out.extend_from_slice(strip);
    out
}
