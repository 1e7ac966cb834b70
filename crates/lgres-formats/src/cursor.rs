//! Bounds-checked little-endian reads over an immutable byte slice
//!
//! Decoders own a [`ByteCursor`] instead of sharing a stream with a mutable
//! position, so two decodes over the same buffer never interfere.

use thiserror::Error;

/// A read ran past the end of its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unexpected end of data at offset {offset:#x} (need {need} bytes, have {have})")]
pub struct UnexpectedEof {
    /// Position of the failed read
    pub offset: usize,
    /// Bytes the read required
    pub need: usize,
    /// Bytes that were left
    pub have: usize,
}

/// Read cursor over a byte slice. All reads are little-endian.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte position.
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Total length of underlying data.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether we've reached the end.
    pub const fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Remaining bytes from current position.
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Move to an absolute position.
    pub fn seek(&mut self, pos: usize) -> Result<(), UnexpectedEof> {
        if pos > self.data.len() {
            return Err(UnexpectedEof {
                offset: pos,
                need: 0,
                have: 0,
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Skip `n` bytes forward.
    pub fn skip(&mut self, n: usize) -> Result<(), UnexpectedEof> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Read a slice of `n` bytes without copying.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], UnexpectedEof> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], UnexpectedEof> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8, UnexpectedEof> {
        self.ensure(1)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    /// Read a `u16`.
    pub fn read_u16(&mut self) -> Result<u16, UnexpectedEof> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a packed 3-byte little-endian value.
    pub fn read_u24(&mut self) -> Result<u32, UnexpectedEof> {
        let [b0, b1, b2] = self.read_array()?;
        Ok(u32::from_le_bytes([b0, b1, b2, 0]))
    }

    /// Read a `u32`.
    pub fn read_u32(&mut self) -> Result<u32, UnexpectedEof> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read an `i32`.
    pub fn read_i32(&mut self) -> Result<i32, UnexpectedEof> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    fn ensure(&self, n: usize) -> Result<(), UnexpectedEof> {
        let have = self.remaining();
        if n > have {
            return Err(UnexpectedEof {
                offset: self.pos,
                need: n,
                have,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let data = [0x01, 0x34, 0x12, 0x56, 0x34, 0x12, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_u8().unwrap(), 0x01);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_u24().unwrap(), 0x12_3456);
        assert_eq!(cursor.read_i32().unwrap(), -1);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_short_read_reports_position() {
        let data = [0xAA, 0xBB, 0xCC];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(2).unwrap();

        let err = cursor.read_u32().unwrap_err();
        assert_eq!(
            err,
            UnexpectedEof {
                offset: 2,
                need: 4,
                have: 1
            }
        );
        // A failed read does not move the cursor
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read_u8().unwrap(), 0xCC);
    }

    #[test]
    fn test_seek_bounds() {
        let data = [0u8; 4];
        let mut cursor = ByteCursor::new(&data);
        assert!(cursor.seek(4).is_ok());
        assert!(cursor.is_empty());
        assert!(cursor.seek(5).is_err());
    }
}
