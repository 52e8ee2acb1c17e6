//! The message type produced by the transcript parser.
//!
//! A [`Message`] is one logical entry of a transcript: the resolved
//! timestamp from its header line, the sender, and the full body (the
//! header's message remainder plus any continuation lines).
//!
//! # Examples
//!
//! ```
//! use chatsift::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2023, 5, 12, 9, 5, 0).unwrap();
//! let msg = Message::new(ts, "Alice", "Hello");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.body(), "Hello");
//! assert_eq!(msg.date().to_string(), "2023-05-12");
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatsift::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 2, 1, 14, 30, 0).unwrap();
//! let msg = Message::new(ts, "Bob", "Hi\nhow are you?");
//! let json = serde_json::to_string(&msg)?;
//! let parsed: Message = serde_json::from_str(&json)?;
//!
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator placed between the physical lines of a multi-line body.
pub const LINE_SEPARATOR: char = '\n';

/// A single message reconstructed from a transcript.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `DateTime<Utc>` | Resolved header date and time |
/// | `sender` | `String` | Trimmed, non-empty author name |
/// | `body` | `String` | One or more lines joined by `\n` |
///
/// Transcripts carry no zone information, so the wall-clock time from the
/// header is stored as-is in UTC.
///
/// Messages coming out of the parser are never mutated again; the only
/// mutation path (appending continuation lines) is crate-private and used
/// while the message is still open in the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    timestamp: DateTime<Utc>,
    sender: String,
    body: String,
}

impl Message {
    /// Creates a message from its parts.
    pub fn new(timestamp: DateTime<Utc>, sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Appends one continuation line to the body.
    ///
    /// The separator is always inserted, so an empty header remainder
    /// leaves the body starting with a newline.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.body.push(LINE_SEPARATOR);
        self.body.push_str(line);
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the resolved timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the calendar date of the message.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Returns the time of day of the message.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns the number of physical lines in the body.
    pub fn line_count(&self) -> usize {
        self.body.split(LINE_SEPARATOR).count()
    }

    /// Returns the number of whitespace-separated words in the body.
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
