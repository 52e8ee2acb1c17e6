//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{ChatsiftError, Result};

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Sender`, `Body` (`Sender`, `Body` when
///   timestamps are disabled)
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`], returned in memory.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, messages, config)?;
    String::from_utf8(buf).map_err(|e| ChatsiftError::Utf8 {
        context: "CSV output".to_string(),
        source: e,
    })
}

fn write_records<W: Write>(out: W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::with_capacity(3);
    if config.include_timestamps {
        header.push("Timestamp");
    }
    header.push("Sender");
    header.push("Body");
    header
}

/// Build CSV record for a single message.
fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::with_capacity(3);
    if config.include_timestamps {
        record.push(msg.timestamp().format(&config.timestamp_format).to_string());
    }
    record.push(msg.sender().to_string());
    record.push(msg.body().to_string());
    record
}
