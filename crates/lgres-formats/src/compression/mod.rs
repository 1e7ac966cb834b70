//! Dictionary bitstream compression used by LG Res chunks
//!
//! Compressed chunks are a big-endian stream of 14-bit codewords. Codes
//! below `0x100` are literal bytes, two codes are reserved for control and
//! every other code names an earlier dictionary word whose expansion is
//! copied back out of the already decoded output.
//!
//! # Layout
//!
//! | Code              | Meaning                                 |
//! |-------------------|-----------------------------------------|
//! | `0x0000..=0x00FF` | literal byte                            |
//! | `0x0100..=0x3FFD` | reference to word `code - 0x100`        |
//! | `0x3FFE`          | reset the dictionary                    |
//! | `0x3FFF`          | end of stream                           |
//!
//! Only decompression is provided.

mod bit_reader;
mod dictionary;
mod error;

pub use bit_reader::{BitReader, CODE_BITS};
pub use dictionary::{
    END_OF_STREAM, FIRST_REFERENCE, MAX_REFERENCE_WORDS, RESET_DICTIONARY, decompress,
};
pub use error::{CompressionError, CompressionResult};
