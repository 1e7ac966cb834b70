//! `lgres list`: print the chunk directory

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lgres_formats::ChunkDirectoryEntry;
use serde::Serialize;

use crate::output::{
    create_table, format_count_badge, format_path, header_cell, id_cell, numeric_cell,
    print_section_header, regular_cell,
};
use crate::{CommandContext, OutputFormat, to_json};

use super::open_archive;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Archive to read
    #[arg(env = "LGRES_ARCHIVE")]
    pub archive: PathBuf,

    /// Only show chunks with this content type (e.g. bitmap, sound)
    #[arg(short, long)]
    pub content_type: Option<String>,
}

/// One directory row as emitted in JSON output
#[derive(Debug, Serialize)]
pub struct ChunkRow {
    pub id: u16,
    pub chunk_type: String,
    pub content_type: String,
    pub length_packed: u32,
    pub length_unpacked: u32,
    pub data_offset: u64,
}

impl From<&ChunkDirectoryEntry> for ChunkRow {
    fn from(entry: &ChunkDirectoryEntry) -> Self {
        Self {
            id: entry.id.0,
            chunk_type: entry.chunk_type.to_string(),
            content_type: entry.content_type.to_string(),
            length_packed: entry.length_packed,
            length_unpacked: entry.length_unpacked,
            data_offset: entry.data_offset,
        }
    }
}

pub fn handle(args: ListArgs, ctx: &CommandContext) -> Result<()> {
    let archive = open_archive(&args.archive)?;
    let filter = args.content_type.map(|f| f.to_ascii_lowercase());

    let rows: Vec<ChunkRow> = archive
        .entries()
        .iter()
        .map(ChunkRow::from)
        .filter(|row| {
            filter
                .as_deref()
                .is_none_or(|f| row.content_type.to_ascii_lowercase() == f)
        })
        .collect();

    match ctx.format {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            println!("{}", to_json(&rows, ctx.format)?);
        }
        OutputFormat::Text => {
            let style = ctx.style();
            print_section_header(
                &format!(
                    "{} {}",
                    format_path(&args.archive.display().to_string(), &style),
                    format_count_badge(rows.len(), "chunk", &style)
                ),
                &style,
            );

            let mut table = create_table(&style);
            table.set_header(vec![
                header_cell("Id", &style),
                header_cell("Hex", &style),
                header_cell("Storage", &style),
                header_cell("Content", &style),
                header_cell("Packed", &style),
                header_cell("Unpacked", &style),
                header_cell("Offset", &style),
            ]);
            for row in &rows {
                table.add_row(vec![
                    numeric_cell(&row.id.to_string()),
                    id_cell(&format!("{:#06x}", row.id), &style),
                    regular_cell(&row.chunk_type),
                    regular_cell(&row.content_type),
                    numeric_cell(&row.length_packed.to_string()),
                    numeric_cell(&row.length_unpacked.to_string()),
                    numeric_cell(&format!("{:#x}", row.data_offset)),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
