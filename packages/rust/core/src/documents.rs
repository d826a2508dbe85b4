//! JSON document persistence and navigation.
//!
//! Seed documents are read whole, edited in memory through JSON pointers
//! (`/garrison/commander`), and written back in one piece.

use std::path::Path;

use echobase_shared::{EchoBaseError, Record, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Read and decode a JSON document.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| EchoBaseError::io(path, e))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| EchoBaseError::decode(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), bytes = content.len(), "read JSON file");
    Ok(value)
}

/// Write a JSON document (pretty-printed, 2-space indent).
///
/// The file is written next to its target and renamed into place, so a
/// failed write never leaves a truncated document behind.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| EchoBaseError::validation(format!("JSON serialization failed: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EchoBaseError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| EchoBaseError::validation(format!("not a file path: {}", path.display())))?;
    let temp = path.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&temp, json).map_err(|e| EchoBaseError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| EchoBaseError::io(path, e))?;

    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

/// Clone the record at `pointer`.
pub fn record_at(doc: &Value, pointer: &str) -> Result<Record> {
    match doc.pointer(pointer) {
        Some(Value::Object(record)) => Ok(record.clone()),
        Some(_) => Err(EchoBaseError::document(format!("{pointer} is not an object"))),
        None => Err(EchoBaseError::document(format!("missing {pointer}"))),
    }
}

/// Replace the value at `pointer`. The pointer must already exist.
pub fn replace_at(doc: &mut Value, pointer: &str, value: Value) -> Result<()> {
    let slot = doc
        .pointer_mut(pointer)
        .ok_or_else(|| EchoBaseError::document(format!("missing {pointer}")))?;
    *slot = value;
    Ok(())
}

/// Read an integer at `pointer`.
pub fn int_at(doc: &Value, pointer: &str) -> Result<i64> {
    match doc.pointer(pointer) {
        Some(value) => value
            .as_i64()
            .ok_or_else(|| EchoBaseError::document(format!("{pointer} is not an integer: {value}"))),
        None => Err(EchoBaseError::document(format!("missing {pointer}"))),
    }
}
