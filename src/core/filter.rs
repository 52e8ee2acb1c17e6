//! Filter messages by date range and sender.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from specific user |
//!
//! # Examples
//!
//! ```
//! use chatsift::core::filter::{FilterConfig, apply_filters};
//! use chatsift::parser::TranscriptParser;
//!
//! # fn main() -> chatsift::Result<()> {
//! let parser = TranscriptParser::new()?;
//! let seq = parser.parse_str(
//!     "1/1/24, 12:00 - Alice: Old\n15/6/24, 12:00 - Bob: New\n16/6/24, 8:00 - Alice: Newer",
//! );
//!
//! let config = FilterConfig::new()
//!     .with_sender("alice")
//!     .with_date_from("2024-06-01")?;
//!
//! let filtered = apply_filters(seq.into_messages(), &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body(), "Newer");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Date bounds compare the message's calendar date and are inclusive
//! - Sender matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;

use crate::Message;
use crate::error::{ChatsiftError, Result};

/// Input format for filter dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Configuration for filtering messages by date and sender.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only messages on or after this date.
    pub after: Option<NaiveDate>,

    /// Include only messages on or before this date.
    pub before: Option<NaiveDate>,

    /// Include only messages from this sender (case-insensitive).
    pub from: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive), as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive), as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.before = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the sender filter.
    ///
    /// ```
    /// use chatsift::core::filter::FilterConfig;
    ///
    /// // Matches "Alice", "alice", "ALICE"
    /// let config = FilterConfig::new().with_sender("Alice");
    /// assert!(config.is_active());
    /// ```
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Sets the start date directly.
    #[must_use]
    pub fn with_after(mut self, date: NaiveDate) -> Self {
        self.after = Some(date);
        self
    }

    /// Sets the end date directly.
    #[must_use]
    pub fn with_before(mut self, date: NaiveDate) -> Self {
        self.before = Some(date);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.from.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if let Some(ref from) = self.from {
            if !msg.sender().eq_ignore_ascii_case(from) {
                return false;
            }
        }

        let date = msg.date();
        if self.after.is_some_and(|after| date < after) {
            return false;
        }
        if self.before.is_some_and(|before| date > before) {
            return false;
        }
        true
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`ChatsiftError::InvalidDate`] if the input doesn't match.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT)
        .map_err(|_| ChatsiftError::invalid_date(date_str))
}

/// Filters messages, keeping those that match all active filters.
///
/// If no filters are active, returns the original messages unchanged.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages
        .into_iter()
        .filter(|msg| config.matches(msg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_msg(sender: &str, body: &str, date: &str) -> Message {
        let naive = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Message::new(naive.and_hms_opt(12, 0, 0).unwrap().and_utc(), sender, body)
    }

    #[test]
    fn test_filter_by_sender() {
        let messages = vec![
            make_msg("Alice", "Hello", "2024-01-01"),
            make_msg("Bob", "Hi", "2024-01-01"),
            make_msg("alice", "Bye", "2024-01-01"),
        ];

        let filtered = apply_filters(messages, &FilterConfig::new().with_sender("ALICE"));

        assert_eq!(filtered.len(), 2);
        assert!(
            filtered
                .iter()
                .all(|m| m.sender().eq_ignore_ascii_case("alice"))
        );
    }

    #[test]
    fn test_filter_by_date_inclusive() {
        let messages = vec![
            make_msg("Alice", "before", "2024-05-31"),
            make_msg("Alice", "first day", "2024-06-01"),
            make_msg("Alice", "last day", "2024-06-30"),
            make_msg("Alice", "after", "2024-07-01"),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_date_to("2024-06-30")
            .unwrap();
        let filtered = apply_filters(messages, &config);

        let bodies: Vec<&str> = filtered.iter().map(Message::body).collect();
        assert_eq!(bodies, ["first day", "last day"]);
    }

    #[test]
    fn test_combined_filters() {
        let messages = vec![
            make_msg("Alice", "old", "2023-12-31"),
            make_msg("Bob", "new", "2024-02-01"),
            make_msg("Alice", "new", "2024-02-01"),
        ];

        let config = FilterConfig::new()
            .with_sender("Alice")
            .with_after(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].sender(), "Alice");
        assert_eq!(filtered[0].body(), "new");
    }

    #[test]
    fn test_no_filters_passthrough() {
        let messages = vec![make_msg("Alice", "a", "2024-01-01")];
        let config = FilterConfig::new();
        assert!(!config.is_active());
        assert_eq!(apply_filters(messages, &config).len(), 1);
    }

    #[test]
    fn test_invalid_date() {
        let err = FilterConfig::new().with_date_from("01/02/2024").unwrap_err();
        assert!(err.is_invalid_date());
        assert!(err.to_string().contains("01/02/2024"));

        assert!(FilterConfig::new().with_date_to("2024-13-01").is_err());
    }

    #[test]
    fn test_has_date_filter() {
        let config = FilterConfig::new().with_before(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(config.has_date_filter());
        assert!(!FilterConfig::new().with_sender("x").has_date_filter());
    }
}
