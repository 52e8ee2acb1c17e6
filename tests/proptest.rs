//! Property-based tests for chatsift.
//!
//! These tests generate random transcripts to find edge cases.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use proptest::prelude::*;

use chatsift::prelude::*;

const SENDERS: &[&str] = &["Alice", "Bob", "Иван", "村上", "+1 555 0100", "Jean-Luc"];

const BODIES: &[&str] = &[
    "Hello",
    "meet at 10:30: ok?",
    "👍",
    "Привет мир",
    "a;b\"c",
    "see https://example.com/?a=b",
];

/// Header remainders, including the empty one of media and call entries.
const HEADS: &[&str] = &["", "Hello", "meet at 10:30: ok?", "👍"];

/// Lines that can never open a message.
const CONTINUATIONS: &[&str] = &["and more", "ok", "see you: later", "👍👍", "- dash", "[not a date]"];

/// Header-shaped lines every grammar rejects for some reason.
const BAD_HEADERS: &[&str] = &[
    "40/40/23, 9:05 - Bob: bad date",
    "12/5/23, 9:05 -  : no sender",
    "12/5/23, 25:00 - Bob: bad hour",
];

fn parser() -> TranscriptParser {
    TranscriptParser::new().unwrap()
}

fn line_per_message() -> TranscriptParser {
    TranscriptParser::with_config(ParserConfig::line_per_message()).unwrap()
}

/// Generate a valid timestamp using fast strategies (no regex!)
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (2000i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60)
        .prop_map(|(y, mo, d, h, mi, s)| Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
}

fn arb_message() -> impl Strategy<Value = Message> {
    (
        arb_timestamp(),
        prop::sample::select(SENDERS),
        prop::sample::select(BODIES),
    )
        .prop_map(|(ts, sender, body)| Message::new(ts, sender, body))
}

fn arb_messages(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(arb_message(), 0..max_len)
}

/// One physical line of a messy transcript.
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => arb_message().prop_map(|m| bracketed(&m)),
        2 => prop::sample::select(CONTINUATIONS).prop_map(String::from),
        1 => prop::sample::select(BAD_HEADERS).prop_map(String::from),
        1 => Just(String::new()),
        1 => Just("12/5/23, 9:05 - Alice:".to_string()),
    ]
}

fn arb_transcript() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_line(), 0..40)
}

/// Renders a message in the bracketed-seconds notation.
fn bracketed(msg: &Message) -> String {
    format!(
        "[{}] {}: {}",
        msg.timestamp().format("%d/%m/%Y, %H:%M:%S"),
        msg.sender(),
        msg.body()
    )
}

fn non_blank(lines: &[String]) -> usize {
    lines.iter().filter(|l| !l.trim().is_empty()).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================
    // GRAMMAR PROPERTIES
    // ============================================

    /// A bracketed header reproduces the exact message it was rendered from
    #[test]
    fn bracketed_header_round_trips(msg in arb_message()) {
        let seq = parser().parse_str(&bracketed(&msg));
        prop_assert_eq!(seq.messages(), std::slice::from_ref(&msg));
    }

    /// Two-digit years always land in 20YY
    #[test]
    fn two_digit_year_is_2000_plus(yy in 0i32..=99, d in 1u32..=28, m in 1u32..=12) {
        let line = format!("{d}/{m}/{yy:02}, 9:05 - Alice: Hi");
        let seq = parser().parse_str(&line);
        let ts = seq.messages()[0].timestamp();
        prop_assert_eq!(ts.year(), 2000 + yy);
        prop_assert_eq!((ts.day(), ts.month()), (d, m));
    }

    /// Twelve-hour markers map onto the 24-hour clock
    #[test]
    fn twelve_hour_marker(h in 1u32..=12, pm in any::<bool>()) {
        let marker = if pm { "PM" } else { "AM" };
        let line = format!("12/5/23, {h}:30 {marker} - Alice: Hi");
        let seq = parser().parse_str(&line);
        let expected = match (h, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        prop_assert_eq!(seq.messages()[0].timestamp().hour(), expected);
    }

    // ============================================
    // CONTINUATION PROPERTIES
    // ============================================

    /// k trailing lines join the body, or are each counted without continuation
    #[test]
    fn continuation_law(
        msg in arb_message(),
        head in prop::sample::select(HEADS),
        tail in prop::collection::vec(prop::sample::select(CONTINUATIONS), 0..8),
    ) {
        let msg = Message::new(msg.timestamp(), msg.sender(), head);
        let mut input = bracketed(&msg);
        let mut expected = head.to_string();
        for line in &tail {
            input.push('\n');
            input.push_str(line);
            expected.push('\n');
            expected.push_str(line);
        }

        // a header with nothing after it and no tail is dropped
        let dropped = usize::from(expected.is_empty());

        let joined = parser().parse_str(&input);
        prop_assert_eq!(joined.len(), 1 - dropped);
        prop_assert_eq!(joined.unmatched_count(), dropped);
        if dropped == 0 {
            prop_assert_eq!(joined.messages()[0].body(), expected.as_str());
            prop_assert_eq!(joined.messages()[0].line_count(), tail.len() + 1);
        }

        let split = line_per_message().parse_str(&input);
        let split_dropped = usize::from(head.is_empty());
        prop_assert_eq!(split.len(), 1 - split_dropped);
        prop_assert_eq!(split.unmatched_count(), tail.len() + split_dropped);
        if split_dropped == 0 {
            prop_assert_eq!(split.messages()[0].body(), head);
        }
    }

    /// Without continuation every non-blank line is a message or a rejection
    #[test]
    fn line_per_message_accounts_for_every_line(lines in arb_transcript()) {
        let seq = line_per_message().parse_str(&lines.join("\n"));
        prop_assert_eq!(seq.len() + seq.unmatched_count(), non_blank(&lines));
    }

    /// With continuation, lines can only be absorbed, never invented
    #[test]
    fn continuation_never_exceeds_line_count(lines in arb_transcript()) {
        let seq = parser().parse_str(&lines.join("\n"));
        prop_assert!(seq.len() + seq.unmatched_count() <= non_blank(&lines));
    }

    /// Diagnostics, when enabled, list exactly the counted lines
    #[test]
    fn diagnostics_match_count(lines in arb_transcript(), continuation in any::<bool>()) {
        let config = ParserConfig::new()
            .with_continuation(continuation)
            .with_diagnostics(true);
        let seq = TranscriptParser::with_config(config)
            .unwrap()
            .parse_str(&lines.join("\n"));
        prop_assert_eq!(seq.diagnostics().len(), seq.unmatched_count());
    }

    /// Every produced message has a non-empty sender and body
    #[test]
    fn messages_are_never_empty(lines in arb_transcript()) {
        let seq = parser().parse_str(&lines.join("\n"));
        for msg in &seq {
            prop_assert!(!msg.sender().is_empty());
            prop_assert!(!msg.is_empty());
        }
    }

    /// Rendering parsed messages and parsing again changes nothing
    #[test]
    fn reparse_is_idempotent(lines in arb_transcript()) {
        let first = parser().parse_str(&lines.join("\n"));
        let rendered: Vec<String> = first.iter().map(bracketed).collect();
        let second = parser().parse_str(&rendered.join("\n"));
        prop_assert_eq!(first.messages(), second.messages());
        prop_assert_eq!(second.unmatched_count(), 0);
    }

    /// Parsing never reorders messages
    #[test]
    fn arrival_order_preserved(messages in arb_messages(20)) {
        let rendered: Vec<String> = messages.iter().map(bracketed).collect();
        let seq = parser().parse_str(&rendered.join("\n"));
        prop_assert_eq!(seq.messages(), messages.as_slice());
    }

    /// Sorting yields a non-decreasing permutation
    #[test]
    fn sorted_is_ordered(messages in arb_messages(20)) {
        let rendered: Vec<String> = messages.iter().map(bracketed).collect();
        let sorted = parser().parse_str(&rendered.join("\n")).sorted_by_timestamp();
        prop_assert_eq!(sorted.len(), messages.len());
        prop_assert!(sorted.messages().windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()));
    }

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// No filter means passthrough
    #[test]
    fn no_filter_is_passthrough(messages in arb_messages(20)) {
        let original = messages.clone();
        let filtered = apply_filters(messages, &FilterConfig::new());
        prop_assert_eq!(filtered, original);
    }

    /// Sender filter only keeps matching senders (ASCII case insensitive)
    #[test]
    fn sender_filter_only_keeps_matching(
        messages in arb_messages(20),
        sender in prop::sample::select(SENDERS),
    ) {
        let config = FilterConfig::new().with_sender(sender.to_ascii_uppercase());
        let expected = messages.iter().filter(|m| m.sender() == sender).count();
        let filtered = apply_filters(messages, &config);
        prop_assert_eq!(filtered.len(), expected);
        prop_assert!(filtered.iter().all(|m| m.sender() == sender));
    }

    /// Date filter keeps exactly the messages inside the range
    #[test]
    fn date_filter_bounds(messages in arb_messages(20), a in 0u64..36_500, b in 0u64..36_500) {
        let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let (lo, hi) = (a.min(b), a.max(b));
        let after = base + chrono::Days::new(lo);
        let before = base + chrono::Days::new(hi);

        let config = FilterConfig::new().with_after(after).with_before(before);
        let expected = messages
            .iter()
            .filter(|m| m.date() >= after && m.date() <= before)
            .count();
        let filtered = apply_filters(messages, &config);
        prop_assert_eq!(filtered.len(), expected);
    }

    // ============================================
    // STATS PROPERTIES
    // ============================================

    /// Per-sender, per-hour and per-weekday counts all sum to the total
    #[test]
    fn stats_counts_sum_to_total(messages in arb_messages(30)) {
        let stats = ChatStats::compute(&messages);
        prop_assert_eq!(stats.total_messages, messages.len());
        prop_assert_eq!(stats.messages_by_sender.iter().map(|(_, n)| n).sum::<usize>(), messages.len());
        prop_assert_eq!(stats.messages_by_hour.iter().sum::<usize>(), messages.len());
        prop_assert_eq!(stats.messages_by_weekday.iter().sum::<usize>(), messages.len());
        prop_assert_eq!(stats.messages_by_date.values().sum::<usize>(), messages.len());
    }
}
