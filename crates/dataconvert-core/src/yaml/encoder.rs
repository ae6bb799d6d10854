//! YAML encoder: writes a [`Value`] as indentation-based block YAML.
//!
//! - Objects: `key: scalar`, or `key:` followed by the nested block
//! - Arrays: `- scalar`, or a bare `-` followed by the nested block
//! - Two spaces per nesting level, no flow syntax, no trailing newline
//!
//! The output is what [`decode`](super::decode) reads back.

use crate::value::{format_float, Map, Value};

/// Encode a value as YAML.
///
/// Objects and arrays emit one line per entry; a root scalar emits its bare
/// rendering. Empty nested collections emit only their `key:` / `-` line.
pub fn encode(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(map) => encode_object(map, 0, &mut out),
        Value::Array(items) => encode_list(items, 0, &mut out),
        _ => out.push_str(&encode_scalar(value)),
    }
    out
}

fn encode_object(map: &Map, depth: usize, out: &mut String) {
    for (key, value) in map {
        if value.is_collection() {
            push_line(out, depth, &format!("{key}:"));
            encode_nested(value, depth + 1, out);
        } else {
            push_line(out, depth, &format!("{key}: {}", encode_scalar(value)));
        }
    }
}

fn encode_list(items: &[Value], depth: usize, out: &mut String) {
    for item in items {
        if item.is_collection() {
            push_line(out, depth, "-");
            encode_nested(item, depth + 1, out);
        } else {
            push_line(out, depth, &format!("- {}", encode_scalar(item)));
        }
    }
}

fn encode_nested(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Object(map) => encode_object(map, depth, out),
        Value::Array(items) => encode_list(items, depth, out),
        _ => {}
    }
}

/// Render a scalar.
///
/// Strings are double-quoted when they contain a space or a colon, or when
/// they are empty (an unquoted empty value reads back as null). Quoting does
/// not escape anything. Floats always keep a decimal point so they read back
/// as floats.
fn encode_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) if s.is_empty() || s.contains(' ') || s.contains(':') => {
            format!("\"{s}\"")
        }
        Value::String(s) => s.clone(),
        // Collections never reach scalar position
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Append one line at `depth`, separating it from the previous one.
fn push_line(out: &mut String, depth: usize, line: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&make_indent(depth));
    out.push_str(line);
}

/// Generate a 2-space-per-level indentation string.
fn make_indent(depth: usize) -> String {
    "  ".repeat(depth)
}
