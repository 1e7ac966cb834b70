//! LG Res archive tool library
//!
//! Command handlers and output helpers behind the `lgres` binary.

pub mod commands;
pub mod output;
pub mod wav;

use lgres_formats::ChunkId;
use tracing::Level;

/// Output format options for the CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

/// Logging verbosity
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive for an `EnvFilter`
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Context for command execution
#[derive(Clone, Debug)]
pub struct CommandContext {
    /// Output format
    pub format: OutputFormat,
    /// Whether to disable colors
    pub no_color: bool,
    /// Whether to draw tables with ASCII borders
    pub ascii: bool,
}

impl CommandContext {
    /// Output style matching this context
    pub fn style(&self) -> output::OutputStyle {
        let mut style = output::OutputStyle::new();
        if self.no_color {
            style = style.no_color();
        }
        if self.ascii {
            style = style.ascii();
        }
        style
    }
}

/// Parse a chunk id given in decimal or as `0x`-prefixed hex
pub fn parse_chunk_id(text: &str) -> Result<ChunkId, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => text.parse::<u16>(),
    };
    parsed
        .map(ChunkId)
        .map_err(|e| format!("invalid chunk id '{text}': {e}"))
}

/// Serialize `value` as JSON in the requested flavour
pub fn to_json<T: serde::Serialize>(value: &T, format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::JsonPretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_context_style() {
        let ctx = CommandContext {
            format: OutputFormat::Text,
            no_color: true,
            ascii: true,
        };
        let style = ctx.style();
        assert!(!style.use_color);
        assert!(!style.use_unicode);
    }

    #[test]
    fn test_parse_chunk_id() {
        assert_eq!(parse_chunk_id("700").unwrap(), ChunkId(700));
        assert_eq!(parse_chunk_id("0x2bc").unwrap(), ChunkId(700));
        assert_eq!(parse_chunk_id("0X2BC").unwrap(), ChunkId(700));
        assert!(parse_chunk_id("65536").is_err());
        assert!(parse_chunk_id("0xzz").is_err());
        assert!(parse_chunk_id("").is_err());
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(LogLevel::Debug.as_directive(), "debug");
    }

    #[test]
    fn test_json_flavours() {
        let value = serde_json::json!({ "id": 1 });
        assert_eq!(to_json(&value, OutputFormat::Json).unwrap(), r#"{"id":1}"#);
        assert!(to_json(&value, OutputFormat::JsonPretty).unwrap().contains('\n'));
    }
}
