//! JSON Lines (JSONL) output writer.
//!
//! One message per line, each a standalone JSON object. Multi-line bodies
//! are escaped, so the line count equals the message count.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::json_writer::JsonMessage;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"timestamp":"2023-05-12 09:05:00","sender":"Alice","body":"Hello"}
/// {"timestamp":"2023-05-12 09:06:00","sender":"Bob","body":"Hi"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for msg in messages {
        serde_json::to_writer(&mut writer, &JsonMessage::new(msg, config))?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut output = String::new();
    for msg in messages {
        output.push_str(&serde_json::to_string(&JsonMessage::new(msg, config))?);
        output.push('\n');
    }
    Ok(output)
}
