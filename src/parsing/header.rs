//! Header line recognition.
//!
//! A header line declares a new message: `date, time`, a sender, and the
//! first line of the body. Exports write headers in a few overlapping
//! notations, so each notation is its own [`HeaderGrammar`] compiled into a
//! [`GrammarMatcher`]. Matchers only answer "does this line look like my
//! header, and what are its tokens?"; the order in which they are tried is
//! owned by the [`Assembler`](crate::assembler::Assembler).
//!
//! Built-in grammars, in default priority order:
//! - Bracketed, seconds: `[12/05/2023, 09:05:00] Alice: Hello`
//! - Dash-separated, optional brackets/seconds/AM-PM: `12/5/23, 9:05 - Alice: Hello`
//! - Dash-separated 12-hour: `12/5/23, 9:05 PM - Alice: Hello`
//!
//! Every grammar captures the sender as "one or more characters that are not
//! a colon", so a colon inside the body never splits the sender.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ChatsiftError, Result};

/// Capture group names every grammar pattern must define.
pub const REQUIRED_GROUPS: [&str; 4] = ["date", "time", "sender", "message"];

/// Tokens captured from a header line, prior to normalization.
///
/// `sender` and `message` are already trimmed; `date` and `time` are the raw
/// captures handed to [`normalize_timestamp`](super::datetime::normalize_timestamp).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderTokens<'a> {
    /// Date token, e.g. `12/5/23`
    pub date: &'a str,
    /// Time token, e.g. `9:05 PM`
    pub time: &'a str,
    /// Sender name
    pub sender: &'a str,
    /// Remainder of the line after the sender separator
    pub message: &'a str,
}

/// Something that can recognize a header line.
///
/// Implementors return `None` for lines they don't recognize. This is a
/// classification outcome, not an error.
pub trait HeaderMatcher: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Attempts to match `line`, returning its tokens on success.
    fn match_line<'a>(&self, line: &'a str) -> Option<HeaderTokens<'a>>;
}

/// Declarative description of a header notation.
///
/// Adding or removing a notation is a data change on
/// [`ParserConfig::grammars`](crate::config::ParserConfig::grammars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderGrammar {
    /// `[D/M/Y, H:MM:SS] Sender: message`
    BracketedSeconds,

    /// `[D/M/Y, H:MM[:SS][ AM/PM]] - Sender: message`, brackets and the
    /// comma optional
    ///
    /// A 12-hour time with seconds (`9:05:10 PM`) matches this grammar but
    /// only resolves with [`DateTimeFormat::all()`](crate::parsing::DateTimeFormat::all);
    /// under the default formats the line is counted as
    /// `UnparseableTimestamp`.
    Dashed,

    /// `D/M/Y, H:MM AM/PM - Sender: message`
    TwelveHourDashed,

    /// A user-supplied regex with the named groups in [`REQUIRED_GROUPS`].
    Custom {
        /// Name used in logs
        name: String,
        /// Regex pattern
        pattern: String,
    },
}

impl HeaderGrammar {
    /// Returns the regex pattern for this grammar.
    pub fn pattern(&self) -> &str {
        match self {
            // [12/05/2023, 09:05:00] Alice: Hello
            HeaderGrammar::BracketedSeconds => {
                r"^\[(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),\s*(?P<time>\d{1,2}:\d{2}:\d{2})\]\s+(?P<sender>[^:]+):\s*(?P<message>.*)"
            }
            // 12/5/23, 9:05 - Alice: Hello
            // [12/5/23, 9:05:10 pm] - Alice: Hello
            HeaderGrammar::Dashed => {
                r"^\[?(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),?\s*(?P<time>\d{1,2}:\d{2}(?::\d{2})?(?:\s*[AaPp][Mm])?)\]?\s*-\s*(?P<sender>[^:]+):\s*(?P<message>.*)"
            }
            // 12/5/23, 9:05 PM - Alice: Hello
            HeaderGrammar::TwelveHourDashed => {
                r"^(?P<date>\d{1,2}/\d{1,2}/\d{2,4}),\s*(?P<time>\d{1,2}:\d{2}\s*[AaPp][Mm])\s*-\s*(?P<sender>[^:]+):\s*(?P<message>.*)"
            }
            HeaderGrammar::Custom { pattern, .. } => pattern,
        }
    }

    /// Returns the grammar's name.
    pub fn name(&self) -> &str {
        match self {
            HeaderGrammar::BracketedSeconds => "bracketed-seconds",
            HeaderGrammar::Dashed => "dashed",
            HeaderGrammar::TwelveHourDashed => "twelve-hour-dashed",
            HeaderGrammar::Custom { name, .. } => name,
        }
    }

    /// Returns the built-in grammars in default priority order.
    pub fn builtin() -> Vec<HeaderGrammar> {
        vec![
            HeaderGrammar::BracketedSeconds,
            HeaderGrammar::Dashed,
            HeaderGrammar::TwelveHourDashed,
        ]
    }

    /// Compiles this grammar into a matcher.
    pub fn compile(&self) -> Result<GrammarMatcher> {
        GrammarMatcher::from_pattern(self.name(), self.pattern())
    }
}

/// A compiled [`HeaderGrammar`].
#[derive(Debug, Clone)]
pub struct GrammarMatcher {
    name: String,
    regex: Regex,
}

impl GrammarMatcher {
    /// Compiles a built-in or custom grammar.
    pub fn new(grammar: &HeaderGrammar) -> Result<Self> {
        grammar.compile()
    }

    /// Compiles a raw pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::Config`] if the pattern doesn't compile or
    /// lacks one of the [`REQUIRED_GROUPS`].
    pub fn from_pattern(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let regex = Regex::new(pattern)
            .map_err(|e| ChatsiftError::config(format!("grammar '{name}': {e}")))?;

        for group in REQUIRED_GROUPS {
            if !regex.capture_names().flatten().any(|n| n == group) {
                return Err(ChatsiftError::config(format!(
                    "grammar '{name}' is missing the named group '{group}'"
                )));
            }
        }

        Ok(Self { name, regex })
    }
}

impl HeaderMatcher for GrammarMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn match_line<'a>(&self, line: &'a str) -> Option<HeaderTokens<'a>> {
        let caps = self.regex.captures(line)?;
        Some(HeaderTokens {
            date: caps.name("date").map_or("", |m| m.as_str()),
            time: caps.name("time").map_or("", |m| m.as_str()),
            sender: caps.name("sender").map_or("", |m| m.as_str().trim()),
            message: caps.name("message").map_or("", |m| m.as_str().trim()),
        })
    }
}

/// Compiles a list of grammars, preserving their order.
pub fn compile_grammars(grammars: &[HeaderGrammar]) -> Result<Vec<Box<dyn HeaderMatcher>>> {
    grammars
        .iter()
        .map(|g| g.compile().map(|m| Box::new(m) as Box<dyn HeaderMatcher>))
        .collect()
}
