use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lgres_cli::commands::{
    self, export::ExportArgs, extract::ExtractArgs, info::InfoArgs, list::ListArgs,
};
use lgres_cli::{CommandContext, LogLevel, OutputFormat};

#[derive(Parser)]
#[command(
    name = "lgres",
    about = "Inspect and unpack LG Res resource archives",
    version,
    author,
    long_about = "A command-line tool for LG Res archives: list the chunk directory, describe chunks, extract decoded bytes and export bitmaps, palettes and sounds to PNG and WAV."
)]
struct Cli {
    /// Set the logging level (RUST_LOG takes precedence when set)
    #[arg(
        short,
        long,
        value_enum,
        global = true,
        env = "LGRES_LOG_LEVEL",
        default_value = "warn"
    )]
    log_level: LogLevel,

    /// Output format
    #[arg(
        short = 'o',
        long,
        value_enum,
        global = true,
        env = "LGRES_FORMAT",
        default_value = "text"
    )]
    format: OutputFormat,

    /// Disable colored output (also honours NO_COLOR)
    #[arg(long, global = true)]
    no_color: bool,

    /// Draw tables with ASCII instead of Unicode borders
    #[arg(long, global = true)]
    ascii: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the chunk directory of an archive
    List(ListArgs),

    /// Show details of one chunk
    Info(InfoArgs),

    /// Write decoded chunk or block bytes to disk
    Extract(ExtractArgs),

    /// Export bitmaps and palettes to PNG and sounds to WAV
    Export(ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = CommandContext {
        format: cli.format,
        no_color: cli.no_color,
        ascii: cli.ascii,
    };

    match cli.command {
        Commands::List(args) => commands::list::handle(args, &ctx)?,
        Commands::Info(args) => commands::info::handle(args, &ctx)?,
        Commands::Extract(args) => commands::extract::handle(args, &ctx)?,
        Commands::Export(args) => commands::export::handle(args, &ctx)?,
    }

    Ok(())
}
