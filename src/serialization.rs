//! Record output formats.
//!
//! The CLI batch path writes records as NDJSON (one record per line) or as
//! a single JSON array.

use std::io::Write;

use crate::record::TransactionRecord;

/// Error type for record output operations
#[derive(Debug)]
pub enum SerializationError {
    JsonError(serde_json::Error),
    IoError(std::io::Error),
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::JsonError(err)
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(err: std::io::Error) -> Self {
        SerializationError::IoError(err)
    }
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationError::JsonError(e) => write!(f, "JSON error: {}", e),
            SerializationError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for SerializationError {}

/// Write records as NDJSON, one JSON object per line.
pub fn write_ndjson<W: Write>(
    writer: &mut W,
    records: &[TransactionRecord],
) -> Result<(), SerializationError> {
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(writer, "{}", json)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn write_json_array<W: Write>(
    writer: &mut W,
    records: &[TransactionRecord],
) -> Result<(), SerializationError> {
    let json = serde_json::to_string_pretty(records)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}
