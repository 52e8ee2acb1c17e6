//! The result of one parse.
//!
//! A [`MessageSequence`] holds the closed messages in transcript order and
//! the number of lines that could neither start nor continue a message.
//! It is read-only once handed out.
//!
//! An empty sequence with a non-zero unmatched count is a valid outcome: the
//! input contained no recognizable messages. Surfacing that is up to the
//! caller, typically through [`MessageSequence::warning`].

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::Message;

/// Why a line could not start a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// No header grammar matched the line
    HeaderMismatch,
    /// A grammar matched but no date/time format resolved the tokens
    UnparseableTimestamp,
    /// A grammar matched but the sender was blank
    EmptySender,
    /// A header opened a message that never received any body text
    EmptyBody,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::HeaderMismatch => write!(f, "no header grammar matched"),
            RejectReason::UnparseableTimestamp => write!(f, "unparseable timestamp"),
            RejectReason::EmptySender => write!(f, "empty sender"),
            RejectReason::EmptyBody => write!(f, "empty message body"),
        }
    }
}

/// A line that was counted as unmatched, kept when diagnostics are enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedLine {
    /// 1-based line number in the input
    pub line_number: usize,
    /// The trimmed line text
    pub text: String,
    /// Why the line was rejected
    pub reason: RejectReason,
}

impl fmt::Display for UnmatchedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} ({}): {}", self.line_number, self.reason, self.text)
    }
}

/// Ordered, immutable messages plus the unmatched line count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageSequence {
    messages: Vec<Message>,
    unmatched: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<UnmatchedLine>,
}

impl MessageSequence {
    pub(crate) fn new(
        messages: Vec<Message>,
        unmatched: usize,
        diagnostics: Vec<UnmatchedLine>,
    ) -> Self {
        Self {
            messages,
            unmatched,
            diagnostics,
        }
    }

    /// Returns the messages in transcript order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of lines that could not be placed.
    pub fn unmatched_count(&self) -> usize {
        self.unmatched
    }

    /// Returns the rejected lines, if diagnostics were enabled.
    pub fn diagnostics(&self) -> &[UnmatchedLine] {
        &self.diagnostics
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no message was recognized.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over the messages.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Consumes the sequence, returning the messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Returns the distinct senders in order of first appearance.
    pub fn senders(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.messages
            .iter()
            .map(Message::sender)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Returns the user-facing warning for unparsed lines, if any.
    ///
    /// ```
    /// use chatsift::parser::TranscriptParser;
    ///
    /// let parser = TranscriptParser::new()?;
    /// let seq = parser.parse_str("random garbage");
    /// assert_eq!(seq.warning().as_deref(), Some("Couldn't parse 1 lines"));
    /// # Ok::<(), chatsift::ChatsiftError>(())
    /// ```
    pub fn warning(&self) -> Option<String> {
        (self.unmatched > 0).then(|| format!("Couldn't parse {} lines", self.unmatched))
    }

    /// Returns a copy stably sorted by timestamp.
    ///
    /// Parsing preserves arrival order; exports can contain out-of-order
    /// timestamps (clock changes, concatenated fragments). Messages with equal
    /// timestamps keep their transcript order.
    #[must_use]
    pub fn sorted_by_timestamp(&self) -> Self {
        let mut messages = self.messages.clone();
        messages.sort_by_key(Message::timestamp);
        Self {
            messages,
            unmatched: self.unmatched,
            diagnostics: self.diagnostics.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a MessageSequence {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl IntoIterator for MessageSequence {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}
