//! Consumers of parsed transcripts.
//!
//! This module contains:
//! - [`filter`] - Message filtering by date and sender
//! - [`stats`] - Aggregate statistics (by sender, date, hour, weekday, emoji)
//! - [`models`] - Output configuration
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatsift::core::{
//!     ChatStats, FilterConfig, OutputConfig, apply_filters,
//!     write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod output;
pub mod stats;

pub use filter::{FilterConfig, apply_filters};
pub use models::OutputConfig;
pub use stats::ChatStats;

pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
