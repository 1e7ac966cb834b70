//! Run-length decoder for compressed bitmaps
//!
//! | Command            | Effect                                           |
//! |--------------------|--------------------------------------------------|
//! | `00 n v`           | `n` copies of `v`                                |
//! | `01..=7F`          | that many literal bytes follow                   |
//! | `80 00 00`         | end of image, remaining pixels stay 0            |
//! | `80 lo hi<80`      | skip `hi:lo` pixels                              |
//! | `80 lo 80<=hi<C0`  | `(hi & 3F):lo` literal bytes follow              |
//! | `80 lo hi>=C0 v`   | `(hi & 3F):lo` copies of `v`                     |
//! | `81..=FF`          | skip `cmd & 7F` pixels                           |
//!
//! Skipped pixels keep the value 0, which is transparent when the bitmap's
//! transparency flag is set.

use crate::cursor::ByteCursor;

use super::error::{BitmapError, BitmapResult};

/// Output sink that never grows past the image size
struct PixelWriter {
    pixels: Vec<u8>,
    position: usize,
}

impl PixelWriter {
    fn new(len: usize) -> Self {
        Self {
            pixels: vec![0; len],
            position: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.position >= self.pixels.len()
    }

    fn room(&self, count: usize) -> usize {
        count.min(self.pixels.len() - self.position)
    }

    fn fill(&mut self, count: usize, value: u8) {
        let count = self.room(count);
        self.pixels[self.position..self.position + count].fill(value);
        self.position += count;
    }

    fn skip(&mut self, count: usize) {
        self.position += self.room(count);
    }

    fn copy(&mut self, bytes: &[u8]) {
        let count = self.room(bytes.len());
        self.pixels[self.position..self.position + count].copy_from_slice(&bytes[..count]);
        self.position += count;
    }
}

/// Decode RLE `input` into exactly `len` palette indices.
///
/// Runs that would overflow the image are clamped and decoding stops once
/// every pixel is written. Running out of input first is an error unless
/// the stream ended with the explicit `80 00 00` terminator.
pub fn decode_rle(input: &[u8], len: usize) -> BitmapResult<Vec<u8>> {
    let mut cursor = ByteCursor::new(input);
    let mut out = PixelWriter::new(len);

    let truncated = |out: &PixelWriter| BitmapError::TruncatedStream {
        expected: len,
        decoded: out.position,
    };

    while !out.is_full() {
        let command = cursor.read_u8().map_err(|_| truncated(&out))?;
        match command {
            0x00 => {
                let [count, value] = cursor.read_array().map_err(|_| truncated(&out))?;
                out.fill(usize::from(count), value);
            }
            0x01..=0x7F => {
                let bytes = cursor
                    .read_bytes(usize::from(command))
                    .map_err(|_| truncated(&out))?;
                out.copy(bytes);
            }
            0x80 => {
                let [p1, p2] = cursor.read_array().map_err(|_| truncated(&out))?;
                let count = (usize::from(p2 & 0x3F) << 8) | usize::from(p1);
                match p2 {
                    0x00 if p1 == 0 => break,
                    0x00..=0x7F => out.skip((usize::from(p2) << 8) | usize::from(p1)),
                    0x80..=0xBF => {
                        let bytes = cursor.read_bytes(count).map_err(|_| truncated(&out))?;
                        out.copy(bytes);
                    }
                    0xC0..=0xFF => {
                        let value = cursor.read_u8().map_err(|_| truncated(&out))?;
                        out.fill(count, value);
                    }
                }
            }
            0x81..=0xFF => out.skip(usize::from(command & 0x7F)),
        }
    }

    Ok(out.pixels)
}
