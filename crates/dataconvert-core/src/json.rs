//! JSON codec, delegated to `serde_json`.

use crate::error::{ConvertError, Result};
use crate::value::Value;

/// Parse JSON text. Object key order is preserved.
pub fn parse(text: &str) -> Result<Value> {
    let raw: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(raw))
}

/// Render a value as JSON. Pretty output uses a 2-space indent; non-ASCII
/// characters are written as-is in both modes. Non-finite floats become
/// `null`.
pub fn render(value: &Value, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| ConvertError::Render(e.to_string()))
}
