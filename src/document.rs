//! Input and output boundary for JSON documents.
//!
//! Parsing happens here, before the traverser is ever called, so malformed
//! input surfaces as a distinct error with no progress events.

use crate::error::TranslateError;
use crate::i18n::Language;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Parse user-supplied text (file contents or pasted text).
pub fn parse_document(text: &str) -> Result<Value, TranslateError> {
    Ok(serde_json::from_str(text)?)
}

/// Pretty-print a document with two-space indentation, keys in order.
pub fn render_document(value: &Value) -> String {
    // Serializing a Value cannot fail: all keys are strings
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Default download name for a translated document.
pub fn output_file_name(language: &Language) -> String {
    format!("translated_{}.json", language.code())
}

/// Write a translated document.
///
/// The content goes to a sibling temp file first and is then renamed over
/// `path`, so an interrupted write leaves any previous output in place.
pub async fn write_document(path: &Path, value: &Value) -> Result<()> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Output path has no file name: {}", path.display()))?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".partial");
    let temp_path = path.with_file_name(temp_name);

    let mut content = render_document(value);
    content.push('\n');

    tokio::fs::write(&temp_path, content)
        .await
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    tokio::fs::rename(&temp_path, path)
        .await
        .with_context(|| format!("Failed to move output into place at {}", path.display()))?;

    Ok(())
}
