//! Typed decoding by content type
//!
//! [`decode_resource`] picks the decoder for a chunk from its directory
//! entry. Content with no decoder in this crate (video, models, movies and
//! maps) is returned as raw blocks.

use tracing::debug;

use crate::archive::{Archive, ArchiveError, ChunkId, ContentType};
use crate::bitmap::Bitmap;
use crate::error::{Error, Result};
use crate::font::{Font, decode_font};
use crate::palette::{Palette, decode_palette};
use crate::sound::{SoundEffect, decode_sound_effect};
use crate::text::decode_strings;

/// A decoded chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// 256-entry palette
    Palette(Palette),
    /// One string per block
    Text(Vec<String>),
    /// One bitmap per block
    Bitmaps(Vec<Bitmap>),
    /// Bitmap font
    Font(Font),
    /// Flattened sound effect
    Sound(SoundEffect),
    /// Content passed through undecoded
    Raw {
        /// Content type from the directory
        content_type: ContentType,
        /// Decoded (decompressed and split) blocks
        blocks: Vec<Vec<u8>>,
    },
}

impl Resource {
    /// Content type the resource was decoded as
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Palette(_) => ContentType::Palette,
            Self::Text(_) => ContentType::Text,
            Self::Bitmaps(_) => ContentType::Bitmap,
            Self::Font(_) => ContentType::Font,
            Self::Sound(_) => ContentType::Sound,
            Self::Raw { content_type, .. } => *content_type,
        }
    }
}

/// Decode chunk `id` according to its content type
pub fn decode_resource<B: AsRef<[u8]>>(archive: &Archive<B>, id: ChunkId) -> Result<Resource> {
    let entry = archive
        .get_chunk_info(id)
        .ok_or(ArchiveError::ChunkNotFound(id))?;
    debug!("Decoding chunk {} as {}", id, entry.content_type);

    let resource = match entry.content_type {
        ContentType::Palette => Resource::Palette(decode_palette(&archive.get_chunk_data(id, 0)?)?),
        ContentType::Text => Resource::Text(decode_strings(&archive.get_chunk_datas(id)?)),
        ContentType::Bitmap => Resource::Bitmaps(
            archive
                .get_chunk_datas(id)?
                .iter()
                .map(|block| Bitmap::parse(block))
                .collect::<std::result::Result<_, _>>()?,
        ),
        ContentType::Font => Resource::Font(decode_font(&archive.get_chunk_data(id, 0)?)?),
        ContentType::Sound => {
            Resource::Sound(decode_sound_effect(&archive.get_chunk_data(id, 0)?)?)
        }
        content_type @ (ContentType::Video
        | ContentType::Model
        | ContentType::Movie
        | ContentType::Map) => Resource::Raw {
            content_type,
            blocks: archive.get_chunk_datas(id)?,
        },
        ContentType::Other(content_type) => {
            return Err(Error::UnknownContentType { id, content_type });
        }
    };

    Ok(resource)
}
