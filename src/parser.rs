//! Transcript parser entry point.
//!
//! [`TranscriptParser`] compiles a [`ParserConfig`] once and then parses any
//! number of transcripts. Parsing in-memory text never fails: malformed lines
//! are counted in the returned [`MessageSequence`]. Only reading the input
//! (files, readers) and building the parser can return errors.
//!
//! # Example
//!
//! ```rust
//! use chatsift::parser::TranscriptParser;
//!
//! let parser = TranscriptParser::new()?;
//! let seq = parser.parse_str("[01/02/2024, 14:30:00] Bob: Hi\nhow are you?");
//!
//! assert_eq!(seq.len(), 1);
//! assert_eq!(seq.messages()[0].sender(), "Bob");
//! assert_eq!(seq.messages()[0].body(), "Hi\nhow are you?");
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```
//!
//! # Concurrency
//!
//! A parser holds no per-parse state, so one instance can be shared across
//! threads; every call builds its own [`Assembler`].

use std::fmt;
use std::fs;
use std::io::BufRead;
use std::path::Path;

use crate::assembler::Assembler;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::parsing::{HeaderMatcher, compile_grammars};
use crate::sequence::MessageSequence;

/// Parses transcripts according to a [`ParserConfig`].
pub struct TranscriptParser {
    config: ParserConfig,
    matchers: Vec<Box<dyn HeaderMatcher>>,
}

impl TranscriptParser {
    /// Creates a parser with the default configuration.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in configuration; the `Result` mirrors
    /// [`with_config`](Self::with_config).
    pub fn new() -> Result<Self> {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::Config`](crate::ChatsiftError::Config) if the
    /// configuration has no grammars or formats, or a custom grammar is
    /// invalid. No input is read in that case.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        let matchers = compile_grammars(&config.grammars)?;
        Ok(Self { config, matchers })
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Starts a new assembler for feeding lines incrementally.
    pub fn assembler(&self) -> Assembler<'_> {
        Assembler::new(
            &self.matchers,
            &self.config.formats,
            self.config.continuation,
            self.config.collect_diagnostics,
        )
    }

    /// Parses a transcript held in memory.
    pub fn parse_str(&self, content: &str) -> MessageSequence {
        let mut assembler = self.assembler();
        for line in content.lines() {
            assembler.feed_line(line);
        }
        assembler.finish()
    }

    /// Parses a transcript from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::Io`](crate::ChatsiftError::Io) if reading
    /// fails, including on invalid UTF-8.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<MessageSequence> {
        let mut assembler = self.assembler();
        for line in reader.lines() {
            assembler.feed_line(&line?);
        }
        Ok(assembler.finish())
    }

    /// Parses a transcript file.
    ///
    /// The whole file is read into memory before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsiftError::Io`](crate::ChatsiftError::Io) if the file
    /// cannot be read.
    pub fn parse(&self, path: &Path) -> Result<MessageSequence> {
        let content = fs::read_to_string(path)?;
        Ok(self.parse_str(&content))
    }

    /// Parses a transcript file (convenience method accepting `&str` path).
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_file(&self, path: &str) -> Result<MessageSequence> {
        self.parse(Path::new(path))
    }
}

impl fmt::Debug for TranscriptParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.matchers.iter().map(|m| m.name()).collect();
        f.debug_struct("TranscriptParser")
            .field("config", &self.config)
            .field("matchers", &names)
            .finish()
    }
}
