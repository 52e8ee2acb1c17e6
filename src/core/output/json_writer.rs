//! JSON output writer.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Flat message structure shared by the JSON and JSONL writers.
#[derive(Serialize)]
pub(super) struct JsonMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    sender: &'a str,
    body: &'a str,
}

impl<'a> JsonMessage<'a> {
    pub(super) fn new(msg: &'a Message, config: &OutputConfig) -> Self {
        Self {
            timestamp: config
                .include_timestamps
                .then(|| msg.timestamp().format(&config.timestamp_format).to_string()),
            sender: msg.sender(),
            body: msg.body(),
        }
    }
}

/// Writes messages to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2023-05-12 09:05:00", "sender": "Alice", "body": "Hello"},
///   {"timestamp": "2023-05-12 09:06:00", "sender": "Bob", "body": "Hi"}
/// ]
/// ```
pub fn write_json(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a pretty-printed JSON array.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let json_messages: Vec<JsonMessage<'_>> = messages
        .iter()
        .map(|m| JsonMessage::new(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&json_messages)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn msg(sender: &str, body: &str) -> Message {
        Message::new(Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap(), sender, body)
    }

    #[test]
    fn test_to_json_basic() {
        let json = to_json(&[msg("Alice", "Hello"), msg("Bob", "Hi")], &OutputConfig::new()).unwrap();

        assert!(json.contains(r#""sender": "Alice""#));
        assert!(json.contains(r#""body": "Hello""#));
        assert!(json.contains(r#""timestamp": "2024-06-15 12:30:00""#));
    }

    #[test]
    fn test_to_json_without_timestamps() {
        let config = OutputConfig::new().without_timestamps();
        let json = to_json(&[msg("Alice", "Hello")], &config).unwrap();
        assert!(!json.contains("timestamp"));
    }

    #[test]
    fn test_to_json_custom_timestamp_format() {
        let config = OutputConfig::new().with_timestamp_format("%Y-%m-%dT%H:%M:%SZ");
        let json = to_json(&[msg("Alice", "Hello")], &config).unwrap();
        assert!(json.contains(r#""timestamp": "2024-06-15T12:30:00Z""#));
    }

    #[test]
    fn test_write_json_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_json(&[msg("Alice", "Hi\nthere")], path, &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0]["body"], "Hi\nthere");
    }
}
