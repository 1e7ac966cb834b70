//! Minimal RIFF/WAVE writer for decoded sound effects

use std::io::{Cursor, Seek, Write};

use binrw::{BinResult, BinWrite};
use lgres_formats::SoundEffect;

const PCM_FORMAT: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;

/// Canonical 44-byte header of an uncompressed PCM wave file
#[derive(Debug, Clone, PartialEq, Eq, BinWrite)]
#[bw(little)]
pub struct WavHeader {
    riff: [u8; 4],
    /// File length minus the first 8 bytes
    pub riff_len: u32,
    wave: [u8; 4],
    fmt: [u8; 4],
    fmt_len: u32,
    format: u16,
    /// Interleaved channels
    pub channels: u16,
    /// Samples per second
    pub sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    data: [u8; 4],
    /// PCM byte count
    pub data_len: u32,
}

impl WavHeader {
    /// Size of the header in bytes
    pub const SIZE: u32 = 44;

    /// Header for `effect`
    pub fn for_effect(effect: &SoundEffect) -> Self {
        let channels = u16::from(effect.channel_count.max(1));
        let bits_per_sample = u16::from(effect.bits_per_sample);
        let block_align = channels * bits_per_sample.div_ceil(8);
        let data_len = effect.pcm.len() as u32;

        Self {
            riff: *b"RIFF",
            riff_len: Self::SIZE - 8 + data_len,
            wave: *b"WAVE",
            fmt: *b"fmt ",
            fmt_len: FMT_CHUNK_LEN,
            format: PCM_FORMAT,
            channels,
            sample_rate: effect.sample_rate,
            byte_rate: effect.sample_rate * u32::from(block_align),
            block_align,
            bits_per_sample,
            data: *b"data",
            data_len,
        }
    }
}

/// Write `effect` as a wave file to `writer`
pub fn write_wav<W: Write + Seek>(effect: &SoundEffect, writer: &mut W) -> BinResult<()> {
    WavHeader::for_effect(effect).write(writer)?;
    writer.write_all(&effect.pcm)?;
    Ok(())
}

/// Encode `effect` as an in-memory wave file
pub fn encode_wav(effect: &SoundEffect) -> BinResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(WavHeader::SIZE as usize + effect.pcm.len()));
    write_wav(effect, &mut cursor)?;
    Ok(cursor.into_inner())
}
