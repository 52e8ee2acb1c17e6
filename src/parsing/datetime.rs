//! Date/time token normalization.
//!
//! Header dates are ambiguous: `03/04/23` may be 3 April or 4 March, the
//! year may be two digits, and the time may be 12- or 24-hour. This module
//! resolves a `(date, time)` token pair into one absolute timestamp by
//! trying a fixed, ordered list of [`DateTimeFormat`]s.
//!
//! Two-digit years are always taken as 20YY. Pre-2000 transcripts with
//! two-digit years will be placed a century late.
//!
//! Day-first formats come before month-first ones, so any date valid both
//! ways resolves day-first. No attempt is made to infer the locale from
//! other lines of the transcript.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Candidate layout for the concatenated `"date time"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateTimeFormat {
    /// `D/M/YYYY H:MM:SS`
    DayFirstSeconds,
    /// `D/M/YYYY H:MM`
    DayFirst,
    /// `D/M/YYYY H:MM AM`
    DayFirstTwelveHour,
    /// `M/D/YYYY H:MM:SS`
    MonthFirstSeconds,
    /// `M/D/YYYY H:MM`
    MonthFirst,
    /// `M/D/YYYY H:MM AM`
    MonthFirstTwelveHour,
    /// `D/M/YYYY H:MM:SS AM`, not in the default list
    DayFirstTwelveHourSeconds,
    /// `M/D/YYYY H:MM:SS AM`, not in the default list
    MonthFirstTwelveHourSeconds,
}

impl DateTimeFormat {
    /// Returns the chrono format string.
    pub fn pattern(self) -> &'static str {
        match self {
            DateTimeFormat::DayFirstSeconds => "%d/%m/%Y %H:%M:%S",
            DateTimeFormat::DayFirst => "%d/%m/%Y %H:%M",
            DateTimeFormat::DayFirstTwelveHour => "%d/%m/%Y %I:%M %p",
            DateTimeFormat::MonthFirstSeconds => "%m/%d/%Y %H:%M:%S",
            DateTimeFormat::MonthFirst => "%m/%d/%Y %H:%M",
            DateTimeFormat::MonthFirstTwelveHour => "%m/%d/%Y %I:%M %p",
            DateTimeFormat::DayFirstTwelveHourSeconds => "%d/%m/%Y %I:%M:%S %p",
            DateTimeFormat::MonthFirstTwelveHourSeconds => "%m/%d/%Y %I:%M:%S %p",
        }
    }

    /// Returns `true` for formats reading the first date field as the day.
    pub fn is_day_first(self) -> bool {
        matches!(
            self,
            DateTimeFormat::DayFirstSeconds
                | DateTimeFormat::DayFirst
                | DateTimeFormat::DayFirstTwelveHour
                | DateTimeFormat::DayFirstTwelveHourSeconds
        )
    }

    /// Returns the default priority list: day-first before month-first.
    pub fn defaults() -> Vec<DateTimeFormat> {
        vec![
            DateTimeFormat::DayFirstSeconds,
            DateTimeFormat::DayFirst,
            DateTimeFormat::DayFirstTwelveHour,
            DateTimeFormat::MonthFirstSeconds,
            DateTimeFormat::MonthFirst,
            DateTimeFormat::MonthFirstTwelveHour,
        ]
    }

    /// Returns every supported format.
    pub fn all() -> &'static [DateTimeFormat] {
        &[
            DateTimeFormat::DayFirstSeconds,
            DateTimeFormat::DayFirst,
            DateTimeFormat::DayFirstTwelveHour,
            DateTimeFormat::MonthFirstSeconds,
            DateTimeFormat::MonthFirst,
            DateTimeFormat::MonthFirstTwelveHour,
            DateTimeFormat::DayFirstTwelveHourSeconds,
            DateTimeFormat::MonthFirstTwelveHourSeconds,
        ]
    }
}

/// Expands a two-digit trailing year component to `20YY`.
///
/// Only the last `/`-separated field is considered; tokens whose year has
/// any other length are returned unchanged.
///
/// ```
/// use chatsift::parsing::expand_two_digit_year;
///
/// assert_eq!(expand_two_digit_year("12/5/23"), "12/5/2023");
/// assert_eq!(expand_two_digit_year("23/5/23"), "23/5/2023");
/// assert_eq!(expand_two_digit_year("12/5/2023"), "12/5/2023");
/// ```
pub fn expand_two_digit_year(date: &str) -> Cow<'_, str> {
    match date.rsplit_once('/') {
        Some((head, year)) if year.len() == 2 && year.bytes().all(|b| b.is_ascii_digit()) => {
            Cow::Owned(format!("{head}/20{year}"))
        }
        _ => Cow::Borrowed(date),
    }
}

/// Canonicalizes the AM/PM marker of a time token.
///
/// Any whitespace between the minutes and the marker (none, several spaces,
/// U+202F) becomes one ASCII space and the marker is upper-cased.
fn normalize_time_token(time: &str) -> Cow<'_, str> {
    let time = time.trim();
    let Some(split) = time.len().checked_sub(2) else {
        return Cow::Borrowed(time);
    };
    if !time.is_char_boundary(split) {
        return Cow::Borrowed(time);
    }

    let (clock, marker) = time.split_at(split);
    if marker.eq_ignore_ascii_case("am") || marker.eq_ignore_ascii_case("pm") {
        Cow::Owned(format!("{} {}", clock.trim_end(), marker.to_ascii_uppercase()))
    } else {
        Cow::Borrowed(time)
    }
}

/// Resolves a date and time token into a timestamp.
///
/// Formats are tried in the given order and the first full match wins.
/// Returns `None` if no format accepts the tokens.
///
/// ```
/// use chatsift::parsing::{DateTimeFormat, normalize_timestamp};
/// use chrono::{Datelike, Timelike};
///
/// let ts = normalize_timestamp("12/5/23", "9:05", &DateTimeFormat::defaults()).unwrap();
/// assert_eq!((ts.year(), ts.month(), ts.day()), (2023, 5, 12));
/// assert_eq!((ts.hour(), ts.minute()), (9, 5));
/// ```
pub fn normalize_timestamp(
    date: &str,
    time: &str,
    formats: &[DateTimeFormat],
) -> Option<DateTime<Utc>> {
    resolve(date, time, formats).map(|(ts, _)| ts)
}

/// Like [`normalize_timestamp`], also returning the format that matched.
pub fn resolve(
    date: &str,
    time: &str,
    formats: &[DateTimeFormat],
) -> Option<(DateTime<Utc>, DateTimeFormat)> {
    let date = expand_two_digit_year(date.trim());
    let time = normalize_time_token(time);
    let candidate = format!("{date} {time}");

    formats.iter().find_map(|&format| {
        NaiveDateTime::parse_from_str(&candidate, format.pattern())
            .ok()
            .map(|naive| (naive.and_utc(), format))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn defaults() -> Vec<DateTimeFormat> {
        DateTimeFormat::defaults()
    }

    #[test]
    fn test_expand_two_digit_year() {
        assert_eq!(expand_two_digit_year("1/2/24"), "1/2/2024");
        assert_eq!(expand_two_digit_year("1/2/00"), "1/2/2000");
        assert_eq!(expand_two_digit_year("1/2/2024"), "1/2/2024");
        assert_eq!(expand_two_digit_year("no-slash"), "no-slash");
    }

    #[test]
    fn test_expand_only_touches_year_field() {
        // The day and month equal the year digits and must stay put.
        assert_eq!(expand_two_digit_year("12/12/12"), "12/12/2012");
    }

    #[test]
    fn test_normalize_time_token() {
        assert_eq!(normalize_time_token("9:05 PM"), "9:05 PM");
        assert_eq!(normalize_time_token("9:05pm"), "9:05 PM");
        assert_eq!(normalize_time_token("9:05   am"), "9:05 AM");
        assert_eq!(normalize_time_token("9:05\u{202f}pm"), "9:05 PM");
        assert_eq!(normalize_time_token("14:30"), "14:30");
        assert_eq!(normalize_time_token("1"), "1");
    }

    #[test]
    fn test_day_first_preferred() {
        let ts = normalize_timestamp("03/04/2023", "10:00", &defaults()).unwrap();
        assert_eq!(ts.day(), 3);
        assert_eq!(ts.month(), 4);
    }

    #[test]
    fn test_month_first_fallback() {
        let (ts, format) = resolve("12/25/2023", "10:00", &defaults()).unwrap();
        assert_eq!(ts.month(), 12);
        assert_eq!(ts.day(), 25);
        assert_eq!(format, DateTimeFormat::MonthFirst);
        assert!(!format.is_day_first());
    }

    #[test]
    fn test_seconds_precision() {
        let (ts, format) = resolve("01/02/2024", "14:30:15", &defaults()).unwrap();
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (14, 30, 15));
        assert_eq!(format, DateTimeFormat::DayFirstSeconds);
    }

    #[test]
    fn test_twelve_hour() {
        let ts = normalize_timestamp("12/5/23", "9:05 PM", &defaults()).unwrap();
        assert_eq!(ts.hour(), 21);
        let ts = normalize_timestamp("12/5/23", "12:15 am", &defaults()).unwrap();
        assert_eq!(ts.hour(), 0);
    }

    #[test]
    fn test_twelve_hour_seconds_needs_opt_in() {
        assert!(normalize_timestamp("12/5/23", "9:05:10 PM", &defaults()).is_none());

        let ts = normalize_timestamp("12/5/23", "9:05:10 PM", DateTimeFormat::all()).unwrap();
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (21, 5, 10));
    }

    #[test]
    fn test_unparseable() {
        assert!(normalize_timestamp("32/13/2023", "10:00", &defaults()).is_none());
        assert!(normalize_timestamp("12/5/23", "25:00", &defaults()).is_none());
        assert!(normalize_timestamp("12/5/23", "10:00", &[]).is_none());
    }

    #[test]
    fn test_two_digit_year_is_twenty_first_century() {
        let ts = normalize_timestamp("1/1/99", "00:00", &defaults()).unwrap();
        assert_eq!(ts.year(), 2099);
    }

    #[test]
    fn test_all_contains_defaults_in_order() {
        let all = DateTimeFormat::all();
        assert_eq!(&all[..6], defaults().as_slice());
    }
}
