//! Sound block types

/// Type tag of one block in the sound stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// End of the stream
    Terminator,
    /// Sample rate divisor, codec and PCM
    SoundData,
    /// More PCM at the current rate
    SoundDataContinuation,
    /// Run of silence at its own rate
    Silence,
    /// Sync marker
    Marker,
    /// Text annotation
    Text,
    /// Start of a repeated section
    RepeatStart,
    /// End of a repeated section
    RepeatEnd,
    /// Parameters for the following sound block
    ExtraInfo,
    /// Extended sound data header and payload
    SoundDataNew,
}

impl BlockType {
    /// Decode a type byte
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::Terminator,
            1 => Self::SoundData,
            2 => Self::SoundDataContinuation,
            3 => Self::Silence,
            4 => Self::Marker,
            5 => Self::Text,
            6 => Self::RepeatStart,
            7 => Self::RepeatEnd,
            8 => Self::ExtraInfo,
            9 => Self::SoundDataNew,
            _ => return None,
        })
    }

    /// Whether a u24 body length follows the type byte
    pub const fn has_length(self) -> bool {
        !matches!(self, Self::Terminator | Self::RepeatEnd)
    }
}

/// Sample rate encoded by a one-byte frequency divisor
pub fn sample_rate_from_divisor(divisor: u8) -> u32 {
    1_000_000 / (256 - u32::from(divisor))
}

/// Zero bytes produced by a silence of `length` samples recorded at
/// `local_rate`, played back at `current_rate`.
pub fn silence_len(length: u32, current_rate: u32, local_rate: u32, channels: u8) -> usize {
    let factor = f64::from(current_rate) / f64::from(local_rate);
    (f64::from(length) * factor * f64::from(channels)).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_types() {
        assert_eq!(BlockType::from_byte(0), Some(BlockType::Terminator));
        assert_eq!(BlockType::from_byte(9), Some(BlockType::SoundDataNew));
        assert_eq!(BlockType::from_byte(10), None);
        assert!(!BlockType::RepeatEnd.has_length());
        assert!(BlockType::RepeatStart.has_length());
    }

    #[test]
    fn test_sample_rate_from_divisor() {
        assert_eq!(sample_rate_from_divisor(156), 10_000);
        assert_eq!(sample_rate_from_divisor(56), 5_000);
        assert_eq!(sample_rate_from_divisor(0), 3_906);
        assert_eq!(sample_rate_from_divisor(255), 1_000_000);
    }

    #[test]
    fn test_silence_len() {
        assert_eq!(silence_len(100, 22_050, 11_025, 1), 200);
        assert_eq!(silence_len(100, 11_025, 22_050, 2), 100);
        assert_eq!(silence_len(3, 10_000, 30_000, 1), 1);
    }
}
