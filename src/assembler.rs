//! The transcript state machine.
//!
//! [`Assembler`] walks a transcript line by line and decides, for each line,
//! whether it opens a new message, continues the open one, or cannot be
//! placed at all.
//!
//! ```text
//!                 header ok                      header ok
//! NoOpenMessage ────────────► OpenMessage ◄──────────────┐
//!      │  ▲                      │   │    (close + open) │
//!      │  │                      │   └───────────────────┘
//!      │  └──── finish() ◄───────┤
//!      │                         │ other line:
//!      │ other line:             │   continuation on  -> append to body
//!      │   unmatched += 1        │   continuation off -> unmatched += 1
//! ```
//!
//! Malformed input never fails the parse. Every rejected line is counted, and
//! kept with its [`RejectReason`] when diagnostics are enabled.

use tracing::{debug, trace};

use crate::Message;
use crate::parsing::{DateTimeFormat, HeaderMatcher, normalize_timestamp};
use crate::sequence::{MessageSequence, RejectReason, UnmatchedLine};

#[derive(Debug)]
enum State {
    NoOpenMessage,
    OpenMessage {
        message: Message,
        /// Line number of the header, reported if the message is dropped
        header_line: usize,
        /// Header text, only kept when diagnostics are enabled
        header_text: Option<String>,
    },
}

/// Line-by-line message assembler.
///
/// An `Assembler` is single-use: feed it lines, then call
/// [`finish`](Self::finish). It borrows the compiled matchers and formats
/// from its [`TranscriptParser`](crate::parser::TranscriptParser), so one
/// parser can drive any number of independent assemblers, one per
/// transcript.
///
/// # Example
///
/// ```
/// use chatsift::parser::TranscriptParser;
///
/// let parser = TranscriptParser::new()?;
/// let mut assembler = parser.assembler();
/// for line in ["12/5/23, 9:05 - Alice: Hello", "second line"] {
///     assembler.feed_line(line);
/// }
/// let seq = assembler.finish();
/// assert_eq!(seq.messages()[0].body(), "Hello\nsecond line");
/// # Ok::<(), chatsift::ChatsiftError>(())
/// ```
pub struct Assembler<'p> {
    matchers: &'p [Box<dyn HeaderMatcher>],
    formats: &'p [DateTimeFormat],
    continuation: bool,
    collect_diagnostics: bool,

    state: State,
    messages: Vec<Message>,
    unmatched: usize,
    diagnostics: Vec<UnmatchedLine>,
    line_number: usize,
}

impl<'p> Assembler<'p> {
    pub(crate) fn new(
        matchers: &'p [Box<dyn HeaderMatcher>],
        formats: &'p [DateTimeFormat],
        continuation: bool,
        collect_diagnostics: bool,
    ) -> Self {
        Self {
            matchers,
            formats,
            continuation,
            collect_diagnostics,
            state: State::NoOpenMessage,
            messages: Vec::new(),
            unmatched: 0,
            diagnostics: Vec::new(),
            line_number: 0,
        }
    }

    /// Consumes one physical line.
    ///
    /// The line is trimmed first; a line that is empty after trimming only
    /// advances the line counter.
    pub fn feed_line(&mut self, raw: &str) {
        self.line_number += 1;
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        match self.classify(line) {
            Ok(message) => {
                self.close_open();
                self.state = State::OpenMessage {
                    message,
                    header_line: self.line_number,
                    header_text: self.collect_diagnostics.then(|| line.to_string()),
                };
            }
            Err(reason) => {
                if self.continuation {
                    if let State::OpenMessage { message, .. } = &mut self.state {
                        trace!(line = self.line_number, "continuation");
                        message.push_line(line);
                        return;
                    }
                }
                self.reject(self.line_number, line, reason);
            }
        }
    }

    /// Number of lines fed so far, blank ones included.
    pub fn lines_seen(&self) -> usize {
        self.line_number
    }

    /// Closes the open message, if any, and returns the result.
    pub fn finish(mut self) -> MessageSequence {
        self.close_open();
        debug!(
            lines = self.line_number,
            messages = self.messages.len(),
            unmatched = self.unmatched,
            "transcript parsed"
        );
        MessageSequence::new(self.messages, self.unmatched, self.diagnostics)
    }

    /// Decides whether `line` opens a message.
    ///
    /// Only the first grammar that matches is used; a later grammar is never
    /// consulted for a line whose tokens failed to normalize.
    fn classify(&self, line: &str) -> Result<Message, RejectReason> {
        let tokens = self
            .matchers
            .iter()
            .find_map(|m| m.match_line(line))
            .ok_or(RejectReason::HeaderMismatch)?;

        if tokens.sender.is_empty() {
            return Err(RejectReason::EmptySender);
        }

        let timestamp = normalize_timestamp(tokens.date, tokens.time, self.formats)
            .ok_or(RejectReason::UnparseableTimestamp)?;

        Ok(Message::new(timestamp, tokens.sender, tokens.message))
    }

    fn close_open(&mut self) {
        let State::OpenMessage {
            message,
            header_line,
            header_text,
        } = std::mem::replace(&mut self.state, State::NoOpenMessage)
        else {
            return;
        };

        if message.is_empty() {
            let text = header_text.unwrap_or_default();
            self.reject(header_line, &text, RejectReason::EmptyBody);
        } else {
            self.messages.push(message);
        }
    }

    fn reject(&mut self, line_number: usize, text: &str, reason: RejectReason) {
        debug!(line = line_number, %reason, text, "unplaced line");
        self.unmatched += 1;
        if self.collect_diagnostics {
            self.diagnostics.push(UnmatchedLine {
                line_number,
                text: text.to_string(),
                reason,
            });
        }
    }
}
