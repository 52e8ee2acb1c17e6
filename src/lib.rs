//! # Chatsift
//!
//! A Rust library for reconstructing messages from exported chat transcripts.
//!
//! ## Overview
//!
//! Chat exports are plain text where each message starts with a header line
//! (`12/5/23, 9:05 PM - Alice: Hello`) and may continue over several
//! physical lines. Chatsift recognizes headers across several date/time
//! notations, reattaches continuation lines, resolves two-digit years and
//! 12/24-hour times, and counts every line it could not place. Malformed
//! input never fails a parse.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatsift::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parser = TranscriptParser::new()?;
//!     let seq = parser.parse_str(
//!         "12/5/23, 9:05 - Alice: Hello\n\
//!          random garbage that continues Alice's message\n\
//!          12/5/23, 9:06 - Bob: Hi",
//!     );
//!
//!     assert_eq!(seq.len(), 2);
//!     assert_eq!(seq.unmatched_count(), 0);
//!     assert!(seq.messages()[0].body().ends_with("Alice's message"));
//!     Ok(())
//! }
//! ```
//!
//! ## Line-per-message mode
//!
//! ```rust
//! use chatsift::prelude::*;
//!
//! let parser = TranscriptParser::with_config(ParserConfig::line_per_message())?;
//! let seq = parser.parse_str("12/5/23, 9:05 - Alice: Hello\nnot a header");
//!
//! assert_eq!(seq.len(), 1);
//! assert_eq!(seq.warning().as_deref(), Some("Couldn't parse 1 lines"));
//! # Ok::<(), ChatsiftError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), the entry point
//! - [`assembler`] - the line-by-line state machine
//! - [`parsing`] - header grammars and date/time normalization
//! - [`sequence`] - [`MessageSequence`], the parse result
//! - [`config`] - [`ParserConfig`](config::ParserConfig)
//! - [`cache`] - content-addressed [`ParseCache`](cache::ParseCache)
//! - [`core`] - filtering, statistics and output writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`error`] - [`ChatsiftError`] and [`Result`]
//!
//! ## Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `csv-output` | CSV writer | `csv` |
//! | `json-output` | JSON/JSONL writers | `serde_json` |
//! | `cli` | `chatsift` binary | `clap`, `tracing-subscriber` |
//! | `gen-test` | Synthetic transcript generator | `rand` |
//! | `full` | All of the above except `gen-test` (default) | |

pub mod assembler;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod sequence;

// Re-export the main types at the crate root for convenience
pub use error::{ChatsiftError, Result};
pub use message::Message;
pub use sequence::{MessageSequence, RejectReason, UnmatchedLine};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatsift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::error::{ChatsiftError, Result};

    pub use crate::cache::ParseCache;
    pub use crate::config::ParserConfig;
    pub use crate::parser::TranscriptParser;
    pub use crate::parsing::{DateTimeFormat, HeaderGrammar};
    pub use crate::sequence::{MessageSequence, RejectReason, UnmatchedLine};

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;
    pub use crate::core::stats::ChatStats;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
