//! JSON document reading and writing.

use std::fs;
use std::path::Path;

use crate::error::ConvertResult;

/// Parse a JSON document from a UTF-8 file.
///
/// The parsed value keeps its object entries in document order; validation of the root
/// shape is the converter's job, not the reader's.
pub fn read_json(path: impl AsRef<Path>) -> ConvertResult<serde_json::Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Serialize a JSON value to a UTF-8 file, pretty-printed with two-space indentation.
///
/// Non-ASCII characters are written literally, never escaped. Parent directories are
/// created as needed before the write.
pub fn write_json(path: impl AsRef<Path>, value: &serde_json::Value) -> ConvertResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}
