//! MSB-first codeword reader

/// Width of every codeword in the stream
pub const CODE_BITS: u32 = 14;

const CODE_MASK: u32 = (1 << CODE_BITS) - 1;

/// Pulls fixed-width 14-bit codes out of a packed big-endian bitstream.
///
/// Bytes are shifted into an accumulator one at a time and codes are taken
/// from its most significant end. Trailing bits that cannot form a whole
/// code are ignored.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
    accumulator: u32,
    buffered: u32,
}

impl<'a> BitReader<'a> {
    /// Create a reader at the start of `data`
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            accumulator: 0,
            buffered: 0,
        }
    }

    /// Read the next codeword, or `None` once fewer than 14 bits remain
    pub fn read_code(&mut self) -> Option<u16> {
        while self.buffered < CODE_BITS {
            let byte = *self.data.get(self.position)?;
            self.position += 1;
            self.accumulator = (self.accumulator << 8) | u32::from(byte);
            self.buffered += 8;
        }

        self.buffered -= CODE_BITS;
        let code = (self.accumulator >> self.buffered) & CODE_MASK;
        self.accumulator &= (1 << self.buffered) - 1;
        Some(code as u16)
    }

    /// Number of input bytes consumed so far
    pub const fn bytes_consumed(&self) -> usize {
        self.position
    }

    /// Bits still available, including those already buffered
    pub const fn bits_remaining(&self) -> usize {
        (self.data.len() - self.position) * 8 + self.buffered as usize
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::pack_codes;

    #[test]
    fn test_reads_codes_msb_first() {
        // 0x3FFF followed by 0x0001 is 28 bits: 11111111111111 00000000000001
        let data = [0xFF, 0xFC, 0x00, 0x10];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_code(), Some(0x3FFF));
        assert_eq!(reader.read_code(), Some(0x0001));
        // 4 bits left over, not enough for another code
        assert_eq!(reader.bits_remaining(), 4);
        assert_eq!(reader.read_code(), None);
    }

    #[test]
    fn test_packed_codes_round_trip() {
        let codes = [0x0041, 0x0100, 0x3FFE, 0x2ABC, 0x0000, 0x3FFF];
        let data = pack_codes(&codes);
        let mut reader = BitReader::new(&data);

        for &expected in &codes {
            assert_eq!(reader.read_code(), Some(expected));
        }
        assert_eq!(reader.read_code(), None);
        assert_eq!(reader.bytes_consumed(), data.len());
    }

    #[test]
    fn test_empty_input() {
        let mut reader = BitReader::new(&[]);
        assert_eq!(reader.read_code(), None);
        assert_eq!(reader.bits_remaining(), 0);
    }
}
