//! Chat statistics.
//!
//! [`ChatStats::compute`] aggregates parsed messages by sender, date, hour
//! and weekday, and counts words and emoji. Rendering the numbers (charts,
//! word clouds) is left to the caller.
//!
//! # Example
//!
//! ```
//! use chatsift::core::stats::ChatStats;
//! use chatsift::parser::TranscriptParser;
//!
//! let parser = TranscriptParser::new()?;
//! let seq = parser.parse_str(
//!     "1/1/24, 9:00 - Alice: morning 😀\n3/1/24, 21:00 - Bob: night 😀😀",
//! );
//! let stats = ChatStats::compute(seq.messages());
//!
//! assert_eq!(stats.total_messages, 2);
//! assert_eq!(stats.total_days, 2);
//! assert_eq!(stats.top_emoji[0], ('😀', 3));
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use serde::Serialize;

use crate::Message;

/// Number of emoji kept in [`ChatStats::top_emoji`].
pub const TOP_EMOJI: usize = 10;

/// Label for the bucket of small senders in [`ChatStats::sender_shares`].
pub const OTHERS_LABEL: &str = "Others";

/// Weekdays in the order used by [`ChatStats::messages_by_weekday`].
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Aggregated statistics over a set of messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatStats {
    pub total_messages: usize,
    /// Days between the first and the last message date
    pub total_days: i64,
    /// `total_messages / total_days`, 0 when `total_days` is 0
    pub avg_messages_per_day: f64,
    /// Descending by count, ties by name
    pub messages_by_sender: Vec<(String, usize)>,
    pub messages_by_date: BTreeMap<NaiveDate, usize>,
    /// Indexed by hour of day
    pub messages_by_hour: [usize; 24],
    /// Monday first
    pub messages_by_weekday: [usize; 7],
    /// Mean whitespace-separated words per message
    pub words_per_message: f64,
    /// Most used emoji, descending by count, ties by first appearance
    pub top_emoji: Vec<(char, usize)>,
}

impl ChatStats {
    /// Computes statistics over `messages`.
    pub fn compute(messages: &[Message]) -> Self {
        let total_messages = messages.len();

        let mut by_sender: HashMap<&str, usize> = HashMap::new();
        let mut messages_by_date = BTreeMap::new();
        let mut messages_by_hour = [0usize; 24];
        let mut messages_by_weekday = [0usize; 7];
        let mut total_words = 0usize;
        let mut emoji = EmojiCounter::default();

        for msg in messages {
            let ts = msg.timestamp();
            *by_sender.entry(msg.sender()).or_default() += 1;
            *messages_by_date.entry(msg.date()).or_default() += 1;
            messages_by_hour[ts.hour() as usize] += 1;
            messages_by_weekday[ts.weekday().num_days_from_monday() as usize] += 1;
            total_words += msg.word_count();
            emoji.scan(msg.body());
        }

        let total_days = match (
            messages_by_date.keys().next(),
            messages_by_date.keys().next_back(),
        ) {
            (Some(first), Some(last)) => (*last - *first).num_days(),
            _ => 0,
        };

        let avg_messages_per_day = if total_days > 0 {
            total_messages as f64 / total_days as f64
        } else {
            0.0
        };

        let words_per_message = if total_messages > 0 {
            total_words as f64 / total_messages as f64
        } else {
            0.0
        };

        let mut messages_by_sender: Vec<(String, usize)> = by_sender
            .into_iter()
            .map(|(sender, count)| (sender.to_string(), count))
            .collect();
        messages_by_sender.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total_messages,
            total_days,
            avg_messages_per_day,
            messages_by_sender,
            messages_by_date,
            messages_by_hour,
            messages_by_weekday,
            words_per_message,
            top_emoji: emoji.top(TOP_EMOJI),
        }
    }

    /// Returns the sender with the most messages.
    pub fn most_active_sender(&self) -> Option<&str> {
        self.messages_by_sender.first().map(|(s, _)| s.as_str())
    }

    /// Returns the busiest hour of day, earliest on ties.
    pub fn peak_hour(&self) -> Option<usize> {
        peak(&self.messages_by_hour)
    }

    /// Returns the busiest weekday, earliest in the week on ties.
    pub fn peak_weekday(&self) -> Option<Weekday> {
        peak(&self.messages_by_weekday).map(|i| WEEKDAYS[i])
    }

    /// Groups senders below `threshold_percent` of all messages into one
    /// [`OTHERS_LABEL`] entry, appended last.
    ///
    /// ```
    /// use chatsift::core::stats::ChatStats;
    /// use chatsift::parser::TranscriptParser;
    ///
    /// let mut chat = String::new();
    /// for _ in 0..99 {
    ///     chat.push_str("1/1/24, 9:00 - Alice: hi\n");
    /// }
    /// chat.push_str("1/1/24, 9:01 - Bob: hey\n");
    ///
    /// let seq = TranscriptParser::new()?.parse_str(&chat);
    /// let shares = ChatStats::compute(seq.messages()).sender_shares(2.0);
    ///
    /// assert_eq!(shares, [("Alice".to_string(), 99), ("Others".to_string(), 1)]);
    /// # Ok::<(), chatsift::ChatsiftError>(())
    /// ```
    pub fn sender_shares(&self, threshold_percent: f64) -> Vec<(String, usize)> {
        if self.total_messages == 0 {
            return Vec::new();
        }

        let total = self.total_messages as f64;
        let mut shares = Vec::new();
        let mut others = 0;
        for (sender, count) in &self.messages_by_sender {
            if *count as f64 * 100.0 / total >= threshold_percent {
                shares.push((sender.clone(), *count));
            } else {
                others += count;
            }
        }
        if others > 0 {
            shares.push((OTHERS_LABEL.to_string(), others));
        }
        shares
    }
}

fn peak(counts: &[usize]) -> Option<usize> {
    let max = *counts.iter().max()?;
    if max == 0 {
        return None;
    }
    counts.iter().position(|&c| c == max)
}

/// Counts emoji, remembering the order in which each was first seen.
#[derive(Default)]
struct EmojiCounter {
    counts: HashMap<char, (usize, usize)>,
}

impl EmojiCounter {
    fn scan(&mut self, text: &str) {
        for c in text.chars().filter(|&c| is_emoji(c)) {
            let next = self.counts.len();
            self.counts.entry(c).or_insert((0, next)).0 += 1;
        }
    }

    fn top(self, n: usize) -> Vec<(char, usize)> {
        let mut entries: Vec<(char, usize, usize)> = self
            .counts
            .into_iter()
            .map(|(c, (count, first))| (c, count, first))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        entries.into_iter().take(n).map(|(c, count, _)| (c, count)).collect()
    }
}

/// Returns `true` if `c` on its own is an emoji in the Unicode emoji list.
///
/// Text-default symbols such as `©` are looked up in their emoji
/// presentation as well. Joiners and variation selectors never match.
pub fn is_emoji(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    let mut buf = [0u8; 4];
    emojis::get(c.encode_utf8(&mut buf)).is_some()
        || emojis::get(&format!("{c}\u{fe0f}")).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn msg(day: u32, hour: u32, sender: &str, body: &str) -> Message {
        Message::new(Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(), sender, body)
    }

    #[test]
    fn test_empty() {
        let stats = ChatStats::compute(&[]);
        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.total_days, 0);
        assert!(stats.avg_messages_per_day.abs() < f64::EPSILON);
        assert!(stats.words_per_message.abs() < f64::EPSILON);
        assert!(stats.most_active_sender().is_none());
        assert!(stats.peak_hour().is_none());
        assert!(stats.sender_shares(1.0).is_empty());
    }

    #[test]
    fn test_single_day_has_zero_average() {
        let stats = ChatStats::compute(&[msg(1, 9, "Alice", "a"), msg(1, 10, "Bob", "b")]);
        assert_eq!(stats.total_days, 0);
        assert!(stats.avg_messages_per_day.abs() < f64::EPSILON);
    }

    #[test]
    fn test_counts() {
        // 2024-01-01 is a Monday
        let messages = [
            msg(1, 9, "Alice", "hello there"),
            msg(1, 9, "Bob", "hi"),
            msg(3, 21, "Alice", "good night all"),
            msg(5, 9, "Carol", "x"),
        ];
        let stats = ChatStats::compute(&messages);

        assert_eq!(stats.total_messages, 4);
        assert_eq!(stats.total_days, 4);
        assert!((stats.avg_messages_per_day - 1.0).abs() < f64::EPSILON);
        assert_eq!(
            stats.messages_by_sender,
            [
                ("Alice".to_string(), 2),
                ("Bob".to_string(), 1),
                ("Carol".to_string(), 1)
            ]
        );
        assert_eq!(stats.messages_by_date.len(), 3);
        assert_eq!(stats.messages_by_hour[9], 3);
        assert_eq!(stats.messages_by_hour[21], 1);
        assert_eq!(stats.messages_by_weekday, [2, 0, 1, 0, 1, 0, 0]);
        assert!((stats.words_per_message - 1.75).abs() < f64::EPSILON);
        assert_eq!(stats.most_active_sender(), Some("Alice"));
        assert_eq!(stats.peak_hour(), Some(9));
        assert_eq!(stats.peak_weekday(), Some(Weekday::Mon));
    }

    #[test]
    fn test_top_emoji_ties_by_first_appearance() {
        let messages = [
            msg(1, 9, "Alice", "🎉 then 👍"),
            msg(1, 10, "Bob", "👍🎉 ok"),
            msg(1, 11, "Bob", "❤"),
        ];
        let stats = ChatStats::compute(&messages);
        assert_eq!(stats.top_emoji, [('🎉', 2), ('👍', 2), ('❤', 1)]);
    }

    #[test]
    fn test_top_emoji_limited() {
        let body: String = ('😀'..='😏').collect();
        let stats = ChatStats::compute(&[msg(1, 9, "Alice", &body)]);
        assert_eq!(stats.top_emoji.len(), TOP_EMOJI);
    }

    #[test]
    fn test_is_emoji() {
        assert!(is_emoji('😀'));
        assert!(is_emoji('🚀'));
        assert!(is_emoji('☀'));
        assert!(is_emoji('🥳'));
        assert!(!is_emoji('a'));
        assert!(!is_emoji('é'));
        assert!(!is_emoji('\u{fe0f}'));
        assert!(!is_emoji('\u{200d}'));
    }

    #[test]
    fn test_is_emoji_text_default_symbols() {
        for c in ['\u{a9}', '\u{ae}', '\u{203c}', '\u{2122}', '\u{2194}', '\u{3030}', '\u{24c2}'] {
            assert!(is_emoji(c), "{c:?}");
        }
    }

    #[test]
    fn test_is_emoji_rejects_plain_symbols() {
        // miscellaneous symbols without an emoji form
        for c in ['\u{2608}', '\u{2616}', '\u{2672}', '#', '1', '*'] {
            assert!(!is_emoji(c), "{c:?}");
        }
    }

    #[test]
    fn test_sender_shares_all_above_threshold() {
        let stats = ChatStats::compute(&[msg(1, 9, "Alice", "a"), msg(1, 9, "Bob", "b")]);
        let shares = stats.sender_shares(1.0);
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|(s, _)| s != OTHERS_LABEL));
    }

    #[test]
    fn test_serialize() {
        let stats = ChatStats::compute(&[msg(1, 9, "Alice", "hi 😀")]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_messages"], 1);
        assert_eq!(json["messages_by_date"]["2024-01-01"], 1);
    }
}
