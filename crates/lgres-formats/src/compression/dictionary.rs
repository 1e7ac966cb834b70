//! Reference dictionary decoder
//!
//! The dictionary never stores strings. Each word remembers where in the
//! output it started and which earlier word it extended, and expansions are
//! copied back out of the output buffer itself.

use tracing::{debug, trace};

use super::bit_reader::BitReader;
use super::error::{CompressionError, CompressionResult};

/// Code that terminates the stream
pub const END_OF_STREAM: u16 = 0x3FFF;

/// Code that empties the dictionary
pub const RESET_DICTIONARY: u16 = 0x3FFE;

/// First code that refers to a dictionary word instead of a literal byte
pub const FIRST_REFERENCE: u16 = 0x0100;

/// Capacity of the dictionary. Words past this are not recorded.
pub const MAX_REFERENCE_WORDS: usize = (RESET_DICTIONARY - 0x00FF) as usize;

#[derive(Debug, Clone, Copy)]
struct Word {
    /// Output position where the word starts
    offset: usize,
    /// Word this one extends, `None` for literals
    back_reference: Option<u16>,
    /// Bytes produced when the word is referenced; 1 until first use
    expansion_length: usize,
}

struct Dictionary {
    words: Vec<Word>,
}

impl Dictionary {
    fn new() -> Self {
        Self {
            words: Vec::with_capacity(1024),
        }
    }

    fn len(&self) -> usize {
        self.words.len()
    }

    fn reset(&mut self) {
        self.words.clear();
    }

    fn register(&mut self, offset: usize, back_reference: Option<u16>) {
        if self.words.len() < MAX_REFERENCE_WORDS {
            self.words.push(Word {
                offset,
                back_reference,
                expansion_length: 1,
            });
        }
    }

    /// Resolve the expansion of word `index`, fixing its length on first use.
    fn resolve(&mut self, index: usize) -> (usize, usize) {
        let word = self.words[index];
        if word.expansion_length != 1 {
            return (word.offset, word.expansion_length);
        }

        let length = match word.back_reference {
            Some(parent) => 1 + self.words[usize::from(parent)].expansion_length,
            None => 2,
        };
        self.words[index].expansion_length = length;
        (word.offset, length)
    }
}

/// Expand a compressed chunk into exactly `expected_len` bytes.
///
/// Decoding stops at [`END_OF_STREAM`], when the input runs out of whole
/// codes, or once the output reaches `expected_len`. Any other final length
/// is reported as [`CompressionError::TruncatedStream`].
pub fn decompress(raw: &[u8], expected_len: usize) -> CompressionResult<Vec<u8>> {
    let mut reader = BitReader::new(raw);
    let mut dictionary = Dictionary::new();
    let mut out = Vec::with_capacity(expected_len);
    let mut resets = 0usize;

    while out.len() < expected_len {
        let Some(code) = reader.read_code() else {
            break;
        };

        match code {
            END_OF_STREAM => break,
            RESET_DICTIONARY => {
                trace!(
                    "Dictionary reset at output offset {} after {} words",
                    out.len(),
                    dictionary.len()
                );
                dictionary.reset();
                resets += 1;
            }
            literal if literal < FIRST_REFERENCE => {
                dictionary.register(out.len(), None);
                out.push(literal as u8);
            }
            reference => {
                let index = usize::from(reference - FIRST_REFERENCE);
                let registered = dictionary.len();
                if index >= registered {
                    return Err(CompressionError::CorruptDictionary {
                        code: reference,
                        word: index,
                        registered,
                    });
                }

                dictionary.register(out.len(), Some(reference - FIRST_REFERENCE));
                let (offset, length) = dictionary.resolve(index);

                let attempted = out.len() + length;
                if attempted > expected_len {
                    return Err(CompressionError::OutputOverflow {
                        expected: expected_len,
                        attempted,
                    });
                }
                if offset >= out.len() {
                    return Err(CompressionError::CorruptDictionary {
                        code: reference,
                        word: index,
                        registered,
                    });
                }

                // Byte by byte: the source may overlap what is being written
                for i in offset..offset + length {
                    let byte = out[i];
                    out.push(byte);
                }
            }
        }
    }

    debug!(
        "Decompressed {} -> {} bytes ({} resets)",
        reader.bytes_consumed(),
        out.len(),
        resets
    );

    if out.len() != expected_len {
        return Err(CompressionError::TruncatedStream {
            expected: expected_len,
            actual: out.len(),
        });
    }

    Ok(out)
}
