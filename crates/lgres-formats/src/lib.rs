//! Readers and decoders for LG Res resource archives
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Format terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::cast_precision_loss)] // Sample rate ratios
//! This crate reads the "LG Res File v2" container used by the game's
//! resource files and decodes the payloads stored inside it.
//!
//! # Supported Formats
//!
//! - **Archive**: signature, chunk directory and random access to chunk
//!   payloads, including multi-block chunks
//! - **Compression**: 14-bit dictionary bitstream used by compressed chunks
//! - **Bitmap**: palette-indexed images, raw or run-length encoded
//! - **Palette**: 256-entry RGB palettes with colour-cycling slots
//! - **Sound**: VOC-style block streams flattened to 8-bit PCM
//! - **Font**: glyph strips with per-character offset tables
//! - **Text**: string tables stored one string per block
//!
//! # Design Principles
//!
//! - **Pure Decoding**: every decoder is a function of an immutable byte
//!   slice and a local cursor, so independent calls never share state
//! - **Bounds Checked**: malformed input yields a typed error, never a panic
//! - **Read Only**: there is no encoder; archives are only ever read
//!
//! # Example
//!
//! ```no_run
//! use lgres_formats::{Archive, ChunkId, decode_palette};
//!
//! let archive = Archive::open("gamepal.res")?;
//! let palette = decode_palette(&archive.get_chunk_data(ChunkId(700), 0)?)?;
//! println!("entry 1 = {:?}", palette.color(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

/// Archive container: signature, chunk directory and chunk access
///
/// See the [`archive`] module for the on-disk layout and block handling.
pub mod archive;
/// Bitmap header parsing and raw/RLE pixel decoding
pub mod bitmap;
/// Dictionary bitstream decompression used by compressed chunks
pub mod compression;
pub mod cursor;
mod error;
/// Font headers, glyph offset tables and glyph strips
pub mod font;
/// 256-entry palettes and colour-cycling slots
pub mod palette;
pub mod resource;
/// VOC-style sound effect block streams
pub mod sound;
pub mod text;

pub use archive::{Archive, ArchiveError, ChunkDirectoryEntry, ChunkId, ChunkType, ContentType};
pub use bitmap::{Bitmap, BitmapError, BitmapHeader, BitmapType, decode_bitmap};
pub use compression::{CompressionError, decompress};
pub use error::{Error, Result};
pub use font::{Font, FontError, decode_font};
pub use palette::{Palette, PaletteError, Rgb, decode_palette, rotate_slots};
pub use resource::{Resource, decode_resource};
pub use sound::{SoundEffect, SoundError, decode_sound_effect};
pub use text::decode_strings;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;
