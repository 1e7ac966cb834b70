//! Creative Voice file header

use binrw::BinRead;

use super::error::{SoundError, SoundResult};

/// Magic text at the start of every sound effect
pub const VOC_MAGIC: [u8; 19] = *b"Creative Voice File";

/// Byte following the magic text
pub const VOC_MAGIC_TERMINATOR: u8 = 0x1A;

/// Size of the fixed header fields
pub const VOC_HEADER_SIZE: usize = 26;

/// Expected `version_check` for a given version
pub const fn version_check_for(version: u16) -> u16 {
    (!version).wrapping_add(0x1234)
}

/// Sound effect header (26 bytes, little-endian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead)]
#[br(little)]
pub struct VocHeader {
    /// "Creative Voice File"
    #[br(assert(magic == VOC_MAGIC, "bad magic {:?}", magic))]
    pub magic: [u8; 19],
    /// Always 0x1A
    #[br(assert(magic_terminator == VOC_MAGIC_TERMINATOR, "bad magic terminator {:#04x}", magic_terminator))]
    pub magic_terminator: u8,
    /// Offset of the first block
    pub header_length: u16,
    /// Format version
    pub version: u16,
    /// `!version + 0x1234`
    pub version_check: u16,
}

impl VocHeader {
    /// Parse and validate the header at the start of `data`
    pub fn parse(data: &[u8]) -> SoundResult<Self> {
        let header = Self::read(&mut std::io::Cursor::new(data))
            .map_err(|e| SoundError::InvalidSoundHeader(e.to_string()))?;

        let expected = version_check_for(header.version);
        if header.version_check != expected {
            return Err(SoundError::InvalidSoundHeader(format!(
                "version check {:#06x} does not match version {:#06x} (expected {expected:#06x})",
                header.version_check, header.version
            )));
        }

        let header_length = usize::from(header.header_length);
        if header_length < VOC_HEADER_SIZE || header_length > data.len() {
            return Err(SoundError::InvalidSoundHeader(format!(
                "header length {header_length} outside {VOC_HEADER_SIZE}..={}",
                data.len()
            )));
        }

        Ok(header)
    }
}
