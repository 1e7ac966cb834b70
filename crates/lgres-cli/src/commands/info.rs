//! `lgres info`: describe one chunk and its decoded contents

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lgres_formats::{ChunkId, ContentType, Resource, decode_resource};
use serde::Serialize;

use crate::output::{format_key_value, print_section_header, print_subsection_header};
use crate::{CommandContext, OutputFormat, parse_chunk_id, to_json};

use super::list::ChunkRow;
use super::open_archive;

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Archive to read
    pub archive: PathBuf,

    /// Chunk id, decimal or 0x hex
    #[arg(value_parser = parse_chunk_id)]
    pub id: ChunkId,
}

#[derive(Debug, Serialize)]
struct Fact {
    key: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct ChunkInfo {
    #[serde(flatten)]
    entry: ChunkRow,
    block_count: u16,
    contents: Vec<Fact>,
}

/// Key facts about a decoded resource
fn describe(resource: &Resource) -> Vec<Fact> {
    let mut facts = Vec::new();
    let mut fact = |key: &str, value: String| {
        facts.push(Fact {
            key: key.to_string(),
            value,
        });
    };

    match resource {
        Resource::Palette(palette) => {
            let distinct: HashSet<_> = palette.colors().iter().collect();
            fact("Entries", palette.colors().len().to_string());
            fact("Distinct colours", distinct.len().to_string());
        }
        Resource::Text(strings) => {
            fact("Strings", strings.len().to_string());
            for (index, text) in strings.iter().enumerate().take(8) {
                fact(&format!("[{index}]"), format!("{text:?}"));
            }
        }
        Resource::Bitmaps(frames) => {
            fact("Frames", frames.len().to_string());
            for (index, frame) in frames.iter().enumerate() {
                let anchor = frame.anchor();
                fact(
                    &format!("[{index}]"),
                    format!(
                        "{:?} {}x{}, anchor ({}, {})-({}, {}){}",
                        frame.header.bitmap_type,
                        frame.width(),
                        frame.height(),
                        anchor.left,
                        anchor.top,
                        anchor.right,
                        anchor.bottom,
                        if frame.header.is_transparent() { ", transparent" } else { "" }
                    ),
                );
            }
        }
        Resource::Font(font) => {
            fact("Kind", format!("{:?}", font.kind));
            fact(
                "Characters",
                format!("{}..={} ({} glyphs)", font.first_char, font.last_char, font.glyph_count()),
            );
            fact("Height", font.height.to_string());
            fact("Strip width", font.strip_width().to_string());
        }
        Resource::Sound(effect) => {
            fact("Sample rate", format!("{} Hz", effect.sample_rate));
            fact("Channels", effect.channel_count.to_string());
            fact("Bits per sample", effect.bits_per_sample.to_string());
            fact("PCM bytes", effect.pcm.len().to_string());
            fact("Duration", format!("{:.3} s", effect.duration().as_secs_f64()));
        }
        Resource::Raw { blocks, .. } => {
            fact("Blocks", blocks.len().to_string());
            fact(
                "Decoded bytes",
                blocks.iter().map(Vec::len).sum::<usize>().to_string(),
            );
        }
    }
    facts
}

pub fn handle(args: InfoArgs, ctx: &CommandContext) -> Result<()> {
    let archive = open_archive(&args.archive)?;
    let entry = archive
        .get_chunk_info(args.id)
        .with_context(|| format!("chunk {} not found in {}", args.id, args.archive.display()))?;
    let block_count = archive
        .block_count(args.id)
        .with_context(|| format!("failed to read block directory of chunk {}", args.id))?;

    let contents = if matches!(entry.content_type, ContentType::Other(_)) {
        Vec::new()
    } else {
        let resource = decode_resource(&archive, args.id)
            .with_context(|| format!("failed to decode chunk {}", args.id))?;
        describe(&resource)
    };

    let info = ChunkInfo {
        entry: ChunkRow::from(entry),
        block_count,
        contents,
    };

    match ctx.format {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            println!("{}", to_json(&info, ctx.format)?);
        }
        OutputFormat::Text => {
            let style = ctx.style();
            print_section_header(&format!("Chunk {}", args.id), &style);
            println!("{}", format_key_value("Storage", &info.entry.chunk_type, &style));
            println!("{}", format_key_value("Content", &info.entry.content_type, &style));
            println!(
                "{}",
                format_key_value("Packed", &format!("{} bytes", info.entry.length_packed), &style)
            );
            println!(
                "{}",
                format_key_value(
                    "Unpacked",
                    &format!("{} bytes", info.entry.length_unpacked),
                    &style
                )
            );
            println!(
                "{}",
                format_key_value("Offset", &format!("{:#x}", info.entry.data_offset), &style)
            );
            println!("{}", format_key_value("Blocks", &block_count.to_string(), &style));

            if !info.contents.is_empty() {
                print_subsection_header("Contents", &style);
                for Fact { key, value } in &info.contents {
                    println!("{}", format_key_value(key, value, &style));
                }
            }
        }
    }

    Ok(())
}
