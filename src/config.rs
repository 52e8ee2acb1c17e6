//! Parser configuration.
//!
//! [`ParserConfig`] is a plain data struct with builder methods, free of any
//! CLI framework dependency. It is validated once, when a
//! [`TranscriptParser`](crate::parser::TranscriptParser) is built.
//!
//! # Example
//!
//! ```rust
//! use chatsift::config::ParserConfig;
//! use chatsift::parsing::{DateTimeFormat, HeaderGrammar};
//!
//! let config = ParserConfig::new()
//!     .with_continuation(true)
//!     .with_grammars(vec![HeaderGrammar::Dashed])
//!     .with_formats(DateTimeFormat::all().to_vec())
//!     .with_diagnostics(true);
//!
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ChatsiftError, Result};
use crate::parsing::{DateTimeFormat, HeaderGrammar};

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatsift::config::ParserConfig;
///
/// // One message per header line, no multi-line bodies
/// let config = ParserConfig::line_per_message();
/// assert!(!config.continuation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Attach non-header lines to the open message (default: true).
    ///
    /// When disabled, every non-header line is counted as unmatched.
    pub continuation: bool,

    /// Header grammars in priority order (default: the three built-ins)
    pub grammars: Vec<HeaderGrammar>,

    /// Date/time formats in priority order (default: six formats, day-first
    /// before month-first)
    pub formats: Vec<DateTimeFormat>,

    /// Keep every unplaceable line with its reason (default: false)
    pub collect_diagnostics: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            continuation: true,
            grammars: HeaderGrammar::builtin(),
            formats: DateTimeFormat::defaults(),
            collect_diagnostics: false,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with continuation support disabled.
    pub fn line_per_message() -> Self {
        Self {
            continuation: false,
            ..Self::default()
        }
    }

    /// Enables or disables continuation lines.
    #[must_use]
    pub fn with_continuation(mut self, enabled: bool) -> Self {
        self.continuation = enabled;
        self
    }

    /// Replaces the header grammar list.
    #[must_use]
    pub fn with_grammars(mut self, grammars: Vec<HeaderGrammar>) -> Self {
        self.grammars = grammars;
        self
    }

    /// Appends a grammar at the lowest priority.
    #[must_use]
    pub fn with_grammar(mut self, grammar: HeaderGrammar) -> Self {
        self.grammars.push(grammar);
        self
    }

    /// Replaces the date/time format list.
    #[must_use]
    pub fn with_formats(mut self, formats: Vec<DateTimeFormat>) -> Self {
        self.formats = formats;
        self
    }

    /// Enables or disables per-line diagnostics.
    #[must_use]
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.collect_diagnostics = enabled;
        self
    }

    /// Checks the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::Config`] if no grammars or no formats are
    /// configured.
    pub fn validate(&self) -> Result<()> {
        if self.grammars.is_empty() {
            return Err(ChatsiftError::config("no header grammars configured"));
        }
        if self.formats.is_empty() {
            return Err(ChatsiftError::config("no date/time formats configured"));
        }
        Ok(())
    }

    /// Returns a stable hex digest identifying this configuration.
    ///
    /// Two configs with the same digest parse any input identically. The
    /// digest covers the flags, the grammar regexes and the chrono format
    /// strings, each length-prefixed, so it does not depend on `Debug`
    /// output. Grammar names only label logs and are left out.
    pub fn fingerprint(&self) -> String {
        fn put(hasher: &mut Sha256, bytes: &[u8]) {
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }

        let mut hasher = Sha256::new();
        put(&mut hasher, FINGERPRINT_VERSION);
        put(&mut hasher, &[u8::from(self.continuation)]);
        put(&mut hasher, &[u8::from(self.collect_diagnostics)]);
        put(&mut hasher, &(self.grammars.len() as u64).to_le_bytes());
        for grammar in &self.grammars {
            put(&mut hasher, grammar.pattern().as_bytes());
        }
        put(&mut hasher, &(self.formats.len() as u64).to_le_bytes());
        for format in &self.formats {
            put(&mut hasher, format.pattern().as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Bumped whenever the fingerprint encoding changes.
const FINGERPRINT_VERSION: &[u8] = b"chatsift-config-v1";
