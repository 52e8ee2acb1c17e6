//! Content-addressed cache of parse results.
//!
//! The parser is a pure function of its input and configuration, so results
//! can be cached by content. [`ParseCache`] keys each entry by the SHA-256 of
//! the transcript text combined with the parser's
//! [`fingerprint`](crate::config::ParserConfig::fingerprint); the same text
//! parsed under two configurations occupies two entries.
//!
//! The cache lives outside the parser and is owned by whoever needs it. It
//! is not synchronized; wrap it in a `Mutex` to share it between threads.
//!
//! # Example
//!
//! ```rust
//! use chatsift::cache::ParseCache;
//! use chatsift::parser::TranscriptParser;
//!
//! let parser = TranscriptParser::new()?;
//! let mut cache = ParseCache::new();
//!
//! let first = cache.get_or_parse(&parser, "12/5/23, 9:05 - Alice: Hello");
//! let second = cache.get_or_parse(&parser, "12/5/23, 9:05 - Alice: Hello");
//!
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! assert_eq!(cache.hits(), 1);
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```

use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::trace;

use crate::parser::TranscriptParser;
use crate::sequence::MessageSequence;

/// Cache of parsed transcripts keyed by content hash.
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: HashMap<String, Arc<MessageSequence>>,
    /// Insertion order, oldest first
    order: VecDeque<String>,
    capacity: Option<NonZeroUsize>,
    hits: u64,
    misses: u64,
}

impl ParseCache {
    /// Creates an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// When full, the oldest entry is evicted first.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Returns the hex SHA-256 digest of `text`.
    pub fn content_key(text: &str) -> String {
        hex::encode(Sha256::digest(text.as_bytes()))
    }

    fn key(parser: &TranscriptParser, text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(parser.config().fingerprint().as_bytes());
        hasher.update(b":");
        hasher.update(Self::content_key(text).as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Returns the cached result for `text`, parsing it on a miss.
    pub fn get_or_parse(&mut self, parser: &TranscriptParser, text: &str) -> Arc<MessageSequence> {
        let key = Self::key(parser, text);
        if let Some(seq) = self.entries.get(&key) {
            self.hits += 1;
            trace!(key = %&key[..12], "cache hit");
            return Arc::clone(seq);
        }

        self.misses += 1;
        trace!(key = %&key[..12], "cache miss");
        let seq = Arc::new(parser.parse_str(text));
        self.insert(key, Arc::clone(&seq));
        seq
    }

    /// Returns the cached result for `text` without parsing.
    pub fn get(&self, parser: &TranscriptParser, text: &str) -> Option<Arc<MessageSequence>> {
        self.entries.get(&Self::key(parser, text)).cloned()
    }

    /// Returns `true` if a result for `text` is cached.
    pub fn contains(&self, parser: &TranscriptParser, text: &str) -> bool {
        self.entries.contains_key(&Self::key(parser, text))
    }

    fn insert(&mut self, key: String, seq: Arc<MessageSequence>) {
        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity.get() {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, seq);
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that required a parse.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Removes every entry. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
