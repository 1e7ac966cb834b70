//! Command handlers for the `lgres` binary

pub mod export;
pub mod extract;
pub mod info;
pub mod list;

use std::path::Path;

use anyhow::{Context, Result};
use lgres_formats::Archive;

/// Open an archive, naming the path in any error
pub(crate) fn open_archive(path: &Path) -> Result<Archive> {
    Archive::open(path).with_context(|| format!("failed to open archive {}", path.display()))
}
