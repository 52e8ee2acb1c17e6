//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - pretty JSON array of messages - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line - requires `json-output` feature
//!
//! Every writer emits the same three fields per message: timestamp (unless
//! disabled in [`OutputConfig`](crate::core::models::OutputConfig)), sender
//! and body. Multi-line bodies are kept intact.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatsift::Result<()> {
//! use chatsift::core::output::{write_csv, write_json, write_jsonl, to_csv};
//! use chatsift::core::models::OutputConfig;
//! use chatsift::parser::TranscriptParser;
//!
//! let parser = TranscriptParser::new()?;
//! let seq = parser.parse_file("chat.txt")?;
//! let config = OutputConfig::new();
//!
//! write_csv(seq.messages(), "output.csv", &config)?;
//! write_json(seq.messages(), "output.json", &config)?;
//! write_jsonl(seq.messages(), "output.jsonl", &config)?;
//!
//! let csv_string = to_csv(seq.messages(), &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
