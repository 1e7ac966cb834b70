//! `lgres export`: convert chunks to PNG and WAV files
//!
//! Bitmaps need a palette. A bitmap's private palette wins; otherwise the
//! palette chunk named by `--palette-id` is used, read from
//! `--palette-archive` or from the same archive.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use image::RgbaImage;
use lgres_formats::{
    Archive, Bitmap, ChunkId, ContentType, Palette, Resource, decode_palette, decode_resource,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::output::{format_path, format_success};
use crate::wav::encode_wav;
use crate::{CommandContext, OutputFormat, parse_chunk_id, to_json};

use super::open_archive;

/// Pixels per palette entry in a swatch image
const SWATCH_CELL: u32 = 16;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Archive to read
    pub archive: PathBuf,

    /// Chunk id, decimal or 0x hex
    #[arg(value_parser = parse_chunk_id)]
    pub id: ChunkId,

    /// Output file; a directory for bitmap chunks with several frames
    #[arg(long)]
    pub output: PathBuf,

    /// Archive holding the palette chunk (defaults to the source archive)
    #[arg(long, requires = "palette_id")]
    pub palette_archive: Option<PathBuf>,

    /// Palette chunk used for bitmaps without a private palette
    #[arg(long, value_parser = parse_chunk_id)]
    pub palette_id: Option<ChunkId>,
}

#[derive(Debug, Serialize)]
struct Exported {
    path: PathBuf,
    kind: &'static str,
}

fn load_palette(archive: &Archive, id: ChunkId) -> Result<Palette> {
    let entry = archive
        .get_chunk_info(id)
        .with_context(|| format!("palette chunk {id} not found"))?;
    if entry.content_type != ContentType::Palette {
        bail!("chunk {id} holds {} content, not a palette", entry.content_type);
    }
    let data = archive
        .get_chunk_data(id, 0)
        .with_context(|| format!("failed to read palette chunk {id}"))?;
    decode_palette(&data).with_context(|| format!("failed to decode palette chunk {id}"))
}

fn save_png(path: &Path, width: u32, height: u32, rgba: Vec<u8>) -> Result<()> {
    let image = RgbaImage::from_raw(width, height, rgba)
        .with_context(|| format!("pixel buffer does not fill a {width}x{height} image"))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!("Wrote {}x{} PNG to {}", width, height, path.display());
    Ok(())
}

/// Render a palette as a 16x16 grid of colour cells
pub fn palette_swatch(palette: &Palette) -> RgbaImage {
    let side = 16 * SWATCH_CELL;
    RgbaImage::from_fn(side, side, |x, y| {
        let index = (y / SWATCH_CELL) * 16 + x / SWATCH_CELL;
        image::Rgba(palette.to_rgba(index as u8, false))
    })
}

fn export_bitmaps(
    archive: &Archive,
    args: &ExportArgs,
    fallback: Option<&Palette>,
) -> Result<Vec<Exported>> {
    let blocks = archive
        .get_chunk_datas(args.id)
        .with_context(|| format!("failed to read blocks of chunk {}", args.id))?;

    let paths: Vec<PathBuf> = if blocks.len() == 1 {
        vec![args.output.clone()]
    } else {
        (0..blocks.len())
            .map(|index| args.output.join(format!("frame_{index:04}.png")))
            .collect()
    };
    info!("Exporting {} frames of chunk {}", blocks.len(), args.id);

    let mut exported = Vec::with_capacity(blocks.len());
    for (index, (block, path)) in blocks.iter().zip(paths).enumerate() {
        let bitmap = Bitmap::parse(block)
            .with_context(|| format!("failed to decode frame {index} of chunk {}", args.id))?;
        let private = bitmap
            .private_palette(block)
            .with_context(|| format!("bad private palette in frame {index} of chunk {}", args.id))?;
        let Some(palette) = private.as_ref().or(fallback) else {
            bail!(
                "frame {index} of chunk {} has no private palette; pass --palette-id",
                args.id
            );
        };

        let rgba = bitmap.to_rgba(palette);
        save_png(
            &path,
            u32::from(bitmap.width()),
            u32::from(bitmap.height()),
            rgba,
        )?;
        exported.push(Exported { path, kind: "png" });
    }
    Ok(exported)
}

pub fn handle(args: ExportArgs, ctx: &CommandContext) -> Result<()> {
    let archive = open_archive(&args.archive)?;
    let entry = archive
        .get_chunk_info(args.id)
        .with_context(|| format!("chunk {} not found in {}", args.id, args.archive.display()))?;

    let exported = match entry.content_type {
        ContentType::Bitmap => {
            let fallback = match (&args.palette_archive, args.palette_id) {
                (Some(path), Some(id)) => Some(load_palette(&open_archive(path)?, id)?),
                (None, Some(id)) => Some(load_palette(&archive, id)?),
                (_, None) => None,
            };
            export_bitmaps(&archive, &args, fallback.as_ref())?
        }
        ContentType::Palette => {
            let palette = load_palette(&archive, args.id)?;
            let swatch = palette_swatch(&palette);
            save_png(&args.output, swatch.width(), swatch.height(), swatch.into_raw())?;
            vec![Exported {
                path: args.output.clone(),
                kind: "png",
            }]
        }
        ContentType::Sound => {
            let Resource::Sound(effect) = decode_resource(&archive, args.id)
                .with_context(|| format!("failed to decode sound chunk {}", args.id))?
            else {
                bail!("chunk {} did not decode as a sound", args.id);
            };
            let wav = encode_wav(&effect).context("failed to encode wave data")?;
            fs::write(&args.output, wav)
                .with_context(|| format!("failed to write {}", args.output.display()))?;
            vec![Exported {
                path: args.output.clone(),
                kind: "wav",
            }]
        }
        other => bail!("chunk {} holds {other} content, which has no export format", args.id),
    };

    match ctx.format {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            println!("{}", to_json(&exported, ctx.format)?);
        }
        OutputFormat::Text => {
            let style = ctx.style();
            for file in &exported {
                println!(
                    "{} {}",
                    format_success(&format!("Exported {}", file.kind), &style),
                    format_path(&file.path.display().to_string(), &style)
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use lgres_formats::Rgb;

    #[test]
    fn test_palette_swatch_layout() {
        let mut colors = [Rgb::default(); 256];
        colors[17] = Rgb { r: 9, g: 8, b: 7 };
        let swatch = palette_swatch(&Palette::from_colors(colors));

        assert_eq!(swatch.dimensions(), (256, 256));
        // Entry 17 is row 1, column 1
        assert_eq!(swatch.get_pixel(16, 16).0, [9, 8, 7, 0xFF]);
        assert_eq!(swatch.get_pixel(31, 31).0, [9, 8, 7, 0xFF]);
        assert_eq!(swatch.get_pixel(32, 16).0, [0, 0, 0, 0xFF]);
    }
}
