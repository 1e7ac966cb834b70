//! `lgres extract`: write decoded chunk bytes to disk

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use lgres_formats::ChunkId;
use serde::Serialize;
use tracing::{debug, info};

use crate::output::{format_path, format_success};
use crate::{CommandContext, OutputFormat, parse_chunk_id, to_json};

use super::open_archive;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Archive to read
    pub archive: PathBuf,

    /// Chunk id, decimal or 0x hex
    #[arg(value_parser = parse_chunk_id)]
    pub id: ChunkId,

    /// Extract only this block
    #[arg(short, long)]
    pub block: Option<u16>,

    /// Output file, or directory when extracting every block of a
    /// multi-block chunk (defaults to the chunk id)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Extracted {
    path: PathBuf,
    bytes: usize,
}

fn write_file(path: &Path, data: &[u8]) -> Result<Extracted> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
    debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(Extracted {
        path: path.to_path_buf(),
        bytes: data.len(),
    })
}

pub fn handle(args: ExtractArgs, ctx: &CommandContext) -> Result<()> {
    let archive = open_archive(&args.archive)?;
    let entry = archive
        .get_chunk_info(args.id)
        .with_context(|| format!("chunk {} not found in {}", args.id, args.archive.display()))?;

    let written = match args.block {
        Some(block) => {
            let data = archive
                .get_chunk_data(args.id, block)
                .with_context(|| format!("failed to read block {block} of chunk {}", args.id))?;
            let path = args
                .output
                .unwrap_or_else(|| PathBuf::from(format!("{}_{block}.bin", args.id.0)));
            vec![write_file(&path, &data)?]
        }
        None if !entry.chunk_type.has_blocks() => {
            let data = archive
                .get_chunk_data(args.id, 0)
                .with_context(|| format!("failed to read chunk {}", args.id))?;
            let path = args
                .output
                .unwrap_or_else(|| PathBuf::from(format!("{}.bin", args.id.0)));
            vec![write_file(&path, &data)?]
        }
        None => {
            let blocks = archive
                .get_chunk_datas(args.id)
                .with_context(|| format!("failed to read blocks of chunk {}", args.id))?;
            let dir = args
                .output
                .unwrap_or_else(|| PathBuf::from(args.id.0.to_string()));
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
            info!("Extracting {} blocks of chunk {}", blocks.len(), args.id);
            blocks
                .iter()
                .enumerate()
                .map(|(index, data)| write_file(&dir.join(format!("block_{index:04}.bin")), data))
                .collect::<Result<Vec<_>>>()?
        }
    };

    match ctx.format {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            println!("{}", to_json(&written, ctx.format)?);
        }
        OutputFormat::Text => {
            let style = ctx.style();
            for file in &written {
                println!(
                    "{} {} ({} bytes)",
                    format_success("Wrote", &style),
                    format_path(&file.path.display().to_string(), &style),
                    file.bytes
                );
            }
        }
    }

    Ok(())
}
