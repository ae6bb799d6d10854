//! YAML decoder: indentation-scoped recursive descent into a [`Value`].
//!
//! Handles the small YAML subset the encoder produces, plus hand-written
//! files in the same shape:
//!
//! - `key: value` pairs and `key:` followed by an indented block
//! - `- item` list entries, `- key: value` single-pair objects, and a bare
//!   `-` followed by an indented block
//! - Scalar inference: `null`, `true`/`false`, digits → integer, float,
//!   quoted string, plain string
//! - `#` comment lines and blank lines are ignored
//!
//! # Leniency
//!
//! The decoder never fails. A line indented less than the current scope ends
//! the scope; a line indented more than the scope (and not claimed by a
//! preceding `key:` or `-`) is skipped. Malformed input therefore yields a
//! partial structure instead of an error.

use crate::value::{Map, Value};
use tracing::debug;

/// Decode YAML text into a [`Value`].
///
/// The top level is always a list or a map: a document with no list items and
/// no key-value lines decodes to an empty map. Surrounding whitespace is
/// trimmed first, so the first line always starts the top-level scope.
pub fn decode(text: &str) -> Value {
    let lines: Vec<&str> = text.trim().lines().collect();
    parse_scope(&lines, 0)
}

/// Parse every line of `lines` that sits exactly at `indent`.
///
/// Returns a list if at least one `- ` item was seen at this indent, else the
/// map built from the key-value lines. The choice is made once the scope has
/// been scanned, so map entries collected before the first list item are
/// discarded.
fn parse_scope(lines: &[&str], indent: usize) -> Value {
    let mut map = Map::new();
    let mut items: Vec<Value> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if is_ignored(trimmed) {
            i += 1;
            continue;
        }

        let line_indent = count_indent(line);
        if line_indent < indent {
            break;
        }
        if line_indent > indent {
            debug!(
                line = i + 1,
                indent = line_indent,
                expected = indent,
                "skipping over-indented line"
            );
            i += 1;
            continue;
        }

        // List item with inline content
        if let Some(content) = trimmed.strip_prefix("- ") {
            items.push(parse_list_item(content.trim()));
            i += 1;
            continue;
        }

        // Bare list marker: the item is the indented block below it
        if trimmed == "-" {
            let end = find_block_end(lines, i + 1, line_indent);
            items.push(parse_nested_block(&lines[i + 1..end]).unwrap_or(Value::Null));
            i = end;
            continue;
        }

        if let Some(colon) = find_key_colon(trimmed) {
            let key = trimmed[..colon].trim();
            let rest = trimmed[colon + 1..].trim();

            if !rest.is_empty() {
                map.insert(key, parse_scalar(rest));
                i += 1;
                continue;
            }

            // `key:` opens a nested block when the following lines are deeper, else null
            let end = find_block_end(lines, i + 1, line_indent);
            let value = parse_nested_block(&lines[i + 1..end]).unwrap_or(Value::Null);
            map.insert(key, value);
            i = end;
            continue;
        }

        debug!(line = i + 1, "ignoring line without key or list marker");
        i += 1;
    }

    if items.is_empty() {
        Value::Object(map)
    } else {
        Value::Array(items)
    }
}

/// Parse the content after `- `. Content with a `key: value` shape becomes a
/// single-entry object; anything else is a scalar.
fn parse_list_item(content: &str) -> Value {
    match find_key_colon(content) {
        Some(colon) => {
            let key = content[..colon].trim();
            let value = parse_scalar(content[colon + 1..].trim());
            let mut map = Map::new();
            map.insert(key, value);
            Value::Object(map)
        }
        None => parse_scalar(content),
    }
}

/// Parse a block collected below a `key:` or `-` line at the indent of its
/// first significant line. `None` when the block has no significant lines.
fn parse_nested_block(block: &[&str]) -> Option<Value> {
    let first = block.iter().find(|line| !is_ignored(line.trim()))?;
    Some(parse_scope(block, count_indent(first)))
}

/// Find the end (exclusive) of the block that starts at `start` and belongs to
/// a parent line at `parent_indent`: the first significant line indented at or
/// below the parent ends it. Blank and comment lines never end a block.
fn find_block_end(lines: &[&str], start: usize, parent_indent: usize) -> usize {
    let mut i = start;
    while i < lines.len() {
        let line = lines[i];
        if !is_ignored(line.trim()) && count_indent(line) <= parent_indent {
            break;
        }
        i += 1;
    }
    i
}

/// Position of the colon that separates key from value.
///
/// A fully quoted token (`"a: b"`) has no key colon, so quoted strings that
/// contain colons survive as list items.
fn find_key_colon(content: &str) -> Option<usize> {
    if strip_matching_quotes(content).is_some() {
        return None;
    }
    content.find(':')
}

/// Infer the type of a scalar token.
///
/// Precedence: empty or `null` → null; `true`/`false` → bool; ASCII digits →
/// integer; anything `f64` accepts → float; quoted → string without the
/// quotes; otherwise the raw token as a string. Only unsigned digit runs are
/// integers, so `-5` decodes as the float `-5.0`.
pub(crate) fn parse_scalar(token: &str) -> Value {
    let token = token.trim();

    if token.is_empty() || token == "null" {
        return Value::Null;
    }
    if token == "true" {
        return Value::Bool(true);
    }
    if token == "false" {
        return Value::Bool(false);
    }

    if token.bytes().all(|b| b.is_ascii_digit()) {
        // Digit runs too large for i64 fall through to the float parse
        if let Ok(n) = token.parse::<i64>() {
            return Value::Integer(n);
        }
    }

    if let Ok(f) = token.parse::<f64>() {
        return Value::Float(f);
    }

    if let Some(inner) = strip_matching_quotes(token) {
        return Value::String(inner.to_string());
    }

    Value::String(token.to_string())
}

/// Inner text of a token wrapped in a matching pair of `"` or `'`.
fn strip_matching_quotes(token: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        token
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

/// Blank lines and `#` comment lines carry no structure.
fn is_ignored(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Count leading whitespace in a line (bytes, so a tab counts as one column).
fn count_indent(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
