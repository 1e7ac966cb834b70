//! VOC-style sound effects
//!
//! Sound chunks hold a Creative Voice header followed by a stream of typed
//! blocks. [`decode_sound_effect`] interprets the stream and flattens it to
//! unsigned 8-bit PCM.
//!
//! # Block Stream
//!
//! ```text
//! u8   type
//! u24  body length      (absent for Terminator and RepeatEnd)
//! ...  body
//! ```
//!
//! | Type | Block                 | Effect on output                          |
//! |------|-----------------------|-------------------------------------------|
//! | 0    | Terminator            | stop                                      |
//! | 1    | SoundData             | set rate from divisor, append PCM         |
//! | 2    | SoundDataContinuation | append PCM                                |
//! | 3    | Silence               | append zeros, rescaled to current rate    |
//! | 4    | Marker                | none                                      |
//! | 5    | Text                  | none                                      |
//! | 6    | RepeatStart           | repeat blocks up to RepeatEnd `n + 1` times |
//! | 7    | RepeatEnd             | close the innermost repeat                |
//! | 8    | ExtraInfo             | none                                      |
//! | 9    | SoundDataNew          | none, payload is skipped                  |

mod block;
mod error;
mod header;

pub use block::{BlockType, sample_rate_from_divisor, silence_len};
pub use error::{SoundError, SoundResult};
pub use header::{VOC_HEADER_SIZE, VOC_MAGIC, VOC_MAGIC_TERMINATOR, VocHeader, version_check_for};

use std::time::Duration;

use tracing::{debug, trace};

use crate::cursor::ByteCursor;

/// Sample rate before any block sets one
pub const DEFAULT_SAMPLE_RATE: u32 = 22_050;

/// Deepest allowed nesting of repeat loops
pub const MAX_REPEAT_DEPTH: usize = 16;

/// Upper bound on decoded PCM
pub const MAX_PCM_BYTES: usize = 64 * 1024 * 1024;

/// Flattened sound effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundEffect {
    /// Samples per second
    pub sample_rate: u32,
    /// Interleaved channels
    pub channel_count: u8,
    /// Always 8
    pub bits_per_sample: u8,
    /// Unsigned 8-bit samples
    pub pcm: Vec<u8>,
}

impl SoundEffect {
    /// Playback length at the effect's sample rate
    pub fn duration(&self) -> Duration {
        let frames = self.pcm.len() as u64 / u64::from(self.channel_count.max(1));
        Duration::from_secs_f64(frames as f64 / f64::from(self.sample_rate.max(1)))
    }
}

/// How one level of the block interpreter finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelEnd {
    Terminator,
    RepeatEnd,
    EndOfStream,
}

struct Interpreter<'a> {
    cursor: ByteCursor<'a>,
    sample_rate: u32,
    channel_count: u8,
}

impl Interpreter<'_> {
    /// Interpret blocks into `out` until a terminator, repeat end or the
    /// end of input.
    fn run(&mut self, out: &mut Vec<u8>, depth: usize) -> SoundResult<LevelEnd> {
        loop {
            let offset = self.cursor.position();
            let Ok(type_byte) = self.cursor.read_u8() else {
                return Ok(LevelEnd::EndOfStream);
            };
            let block_type = BlockType::from_byte(type_byte).ok_or(SoundError::UnknownBlockType {
                block_type: type_byte,
                offset,
            })?;

            let body = if block_type.has_length() {
                let length = self.cursor.read_u24()? as usize;
                self.cursor.read_bytes(length)?
            } else {
                &[]
            };
            let mut body = ByteCursor::new(body);

            trace!("{:?} block at {:#x} ({} bytes)", block_type, offset, body.len());

            match block_type {
                BlockType::Terminator => return Ok(LevelEnd::Terminator),
                BlockType::RepeatEnd => return Ok(LevelEnd::RepeatEnd),
                BlockType::SoundData => {
                    let [divisor, _codec] = body.read_array()?;
                    self.sample_rate = sample_rate_from_divisor(divisor);
                    append(out, body.read_bytes(body.remaining())?)?;
                }
                BlockType::SoundDataContinuation => {
                    body.skip(2)?;
                    append(out, body.read_bytes(body.remaining())?)?;
                }
                BlockType::Silence => {
                    let length = u32::from(body.read_u16()?) + 1;
                    let local_rate = sample_rate_from_divisor(body.read_u8()?);
                    let zeros = silence_len(length, self.sample_rate, local_rate, self.channel_count);
                    reserve(out, zeros)?;
                    out.resize(out.len() + zeros, 0);
                }
                BlockType::Marker => {
                    body.skip(2)?;
                }
                BlockType::Text | BlockType::ExtraInfo => {
                    // Annotation and override parameters are not applied. Text
                    // consumes its whole declared body like every other block.
                }
                BlockType::RepeatStart => {
                    let count = usize::from(body.read_u16()?) + 1;
                    if depth + 1 > MAX_REPEAT_DEPTH {
                        return Err(SoundError::RepeatTooDeep(MAX_REPEAT_DEPTH));
                    }

                    let mut scratch = Vec::new();
                    match self.run(&mut scratch, depth + 1)? {
                        LevelEnd::RepeatEnd => {}
                        LevelEnd::Terminator | LevelEnd::EndOfStream => {
                            return Err(SoundError::UnterminatedRepeat { offset });
                        }
                    }

                    reserve(out, scratch.len().saturating_mul(count))?;
                    for _ in 0..count {
                        out.extend_from_slice(&scratch);
                    }
                }
                BlockType::SoundDataNew => {
                    let rate = body.read_u32()?;
                    let [bits, channels] = body.read_array()?;
                    let codec = body.read_u16()?;
                    body.skip(4)?;
                    trace!(
                        "Skipping {} bytes of extended sound data ({} Hz, {} bits, {} channels, codec {})",
                        body.remaining(),
                        rate,
                        bits,
                        channels,
                        codec
                    );
                }
            }
        }
    }
}

fn reserve(out: &[u8], additional: usize) -> SoundResult<()> {
    if out.len().saturating_add(additional) > MAX_PCM_BYTES {
        return Err(SoundError::OutputTooLarge {
            limit: MAX_PCM_BYTES,
        });
    }
    Ok(())
}

fn append(out: &mut Vec<u8>, samples: &[u8]) -> SoundResult<()> {
    reserve(out, samples.len())?;
    out.extend_from_slice(samples);
    Ok(())
}

/// Decode a sound effect chunk to 8-bit PCM.
///
/// A `RepeatEnd` outside any repeat ends the stream like a terminator.
pub fn decode_sound_effect(data: &[u8]) -> SoundResult<SoundEffect> {
    let header = VocHeader::parse(data)?;

    let mut cursor = ByteCursor::new(data);
    cursor.seek(usize::from(header.header_length))?;

    let mut interpreter = Interpreter {
        cursor,
        sample_rate: DEFAULT_SAMPLE_RATE,
        channel_count: 1,
    };
    let mut pcm = Vec::new();
    let end = interpreter.run(&mut pcm, 0)?;

    debug!(
        "Decoded sound effect v{:#06x}: {} bytes at {} Hz ({:?})",
        header.version,
        pcm.len(),
        interpreter.sample_rate,
        end
    );

    Ok(SoundEffect {
        sample_rate: interpreter.sample_rate,
        channel_count: interpreter.channel_count,
        bits_per_sample: 8,
        pcm,
    })
}
