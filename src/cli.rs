//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - Output format options, convertible into
//!   [`format::OutputFormat`](crate::format::OutputFormat)

use clap::{ArgAction, Parser, ValueEnum};
use tracing::level_filters::LevelFilter;

use crate::config::ParserConfig;
use crate::core::filter::FilterConfig;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Default output path; its extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "messages.csv";

/// Reconstruct messages from an exported chat transcript.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsift")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsift chat.txt
    chatsift chat.txt -o messages.json -f json
    chatsift chat.txt --from Alice --after 2024-01-01 --stats
    chatsift chat.txt --no-continuation --show-unmatched -vv")]
pub struct Args {
    /// Path to the transcript file
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Count lines without a header instead of appending them to the previous message
    #[arg(long)]
    pub no_continuation: bool,

    /// Sort messages by timestamp before writing
    #[arg(long)]
    pub sort: bool,

    /// Keep only messages from this sender (case-insensitive)
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Keep only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Print chat statistics
    #[arg(long)]
    pub stats: bool,

    /// List every line that could not be parsed
    #[arg(long)]
    pub show_unmatched: bool,

    /// Omit timestamps from the output
    #[arg(long)]
    pub no_timestamps: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the parser configuration.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new()
            .with_continuation(!self.no_continuation)
            .with_diagnostics(self.show_unmatched)
    }

    /// Builds the filter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::InvalidDate`](crate::ChatsiftError::InvalidDate)
    /// if `--after` or `--before` is malformed.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut config = FilterConfig::new();
        if let Some(ref after) = self.after {
            config = config.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            config = config.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            config = config.with_sender(from.clone());
        }
        Ok(config)
    }

    /// Builds the output configuration.
    pub fn output_config(&self) -> OutputConfig {
        let config = OutputConfig::new();
        if self.no_timestamps {
            config.without_timestamps()
        } else {
            config
        }
    }

    /// Returns the output path, adjusting the default's extension to the format.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        let format: crate::format::OutputFormat = self.format.into();
        format!("messages.{}", format.extension())
    }

    /// Maps `-v` occurrences to a log level, warnings by default.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of messages
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::format::OutputFormat::from(*self).fmt(f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
