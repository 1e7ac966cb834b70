//! String tables
//!
//! Text chunks store one NUL-terminated string per block in the game's
//! 8-bit character set, which matches Latin-1 for printable text.

/// Decode one string: everything before the first NUL, byte for char
pub fn decode_string(block: &[u8]) -> String {
    let end = block.iter().position(|&b| b == 0).unwrap_or(block.len());
    block[..end].iter().map(|&b| char::from(b)).collect()
}

/// Decode every block of a text chunk
pub fn decode_strings<B: AsRef<[u8]>>(blocks: &[B]) -> Vec<String> {
    blocks.iter().map(|block| decode_string(block.as_ref())).collect()
}
