//! CSV codec: header row + records, comma delimited.
//!
//! Quoting follows RFC 4180: a field wrapped in `"` may contain commas, line
//! breaks and doubled quotes (`""`). Every cell decodes to a string.

use crate::error::{ConvertError, Result};
use crate::value::{Map, Value};

/// Parse CSV text into an array of objects keyed by the header row.
///
/// The text is trimmed first. Empty lines are skipped. A record shorter than
/// the header gets null for the missing fields; extra fields are dropped.
/// Input with only a header (or nothing at all) gives an empty array.
pub fn parse_records(text: &str) -> Result<Value> {
    let mut rows = split_rows(text.trim())?.into_iter();
    let Some(header) = rows.next() else {
        return Ok(Value::Array(Vec::new()));
    };

    let records = rows
        .map(|row| {
            let mut fields = row.into_iter();
            let record: Map = header
                .iter()
                .map(|name| {
                    let value = fields.next().map(Value::String).unwrap_or(Value::Null);
                    (name.clone(), value)
                })
                .collect();
            Value::Object(record)
        })
        .collect();

    Ok(Value::Array(records))
}

/// Split text into rows of raw fields, honouring quoted fields that span
/// lines.
fn split_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                row.push(std::mem::take(&mut field));
                push_row(&mut rows, std::mem::take(&mut row));
                line += 1;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(ConvertError::Csv {
            line: quote_line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }
    Ok(rows)
}

/// Keep a row unless it came from an empty line.
fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }
}

/// Render records as CSV text with a header line.
///
/// Columns come from the first record's keys. Missing fields render empty;
/// a later record with a key the header lacks is an error. Cells use
/// [`Value::to_text`]. Lines end with `\r\n`. No records → empty string.
pub fn render_records(records: &[Value]) -> Result<String> {
    let rows = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            record.as_object().ok_or_else(|| {
                ConvertError::Render(format!(
                    "CSV record {} is {}, expected an object",
                    i + 1,
                    record.kind()
                ))
            })
        })
        .collect::<Result<Vec<&Map>>>()?;

    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let header: Vec<&String> = first.keys().collect();

    let mut out = String::new();
    push_line(&mut out, header.iter().map(|name| name.as_str()));

    for (i, row) in rows.iter().enumerate() {
        if let Some(extra) = row.keys().find(|key| !header.contains(key)) {
            return Err(ConvertError::Render(format!(
                "CSV record {} has field '{}' that is not in the header",
                i + 1,
                extra
            )));
        }
        let cells: Vec<String> = header
            .iter()
            .map(|name| row.get(name).map(Value::to_text).unwrap_or_default())
            .collect();
        push_line(&mut out, cells.iter().map(String::as_str));
    }

    Ok(out)
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(',');
        }
        encode_cell(cell, out);
    }
    out.push_str("\r\n");
}

/// Quote a cell only when it contains a comma, quote or line break.
fn encode_cell(cell: &str, out: &mut String) {
    if cell.contains([',', '"', '\r', '\n']) {
        out.push('"');
        for ch in cell.chars() {
            if ch == '"' {
                out.push('"');
            }
            out.push(ch);
        }
        out.push('"');
    } else {
        out.push_str(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_rows_split_like_lf_rows() {
        let rows = split_rows("a,b\r\n1,2\r\n").unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn doubled_quotes_unescape() {
        let rows = split_rows(r#""say ""hi""",x"#).unwrap();
        assert_eq!(rows, vec![vec![r#"say "hi""#, "x"]]);
    }

    #[test]
    fn empty_lines_are_skipped() {
        let rows = split_rows("a\n\n1\n").unwrap();
        assert_eq!(rows, vec![vec!["a"], vec!["1"]]);
    }

    #[test]
    fn trailing_empty_field_is_kept() {
        let rows = split_rows("a,").unwrap();
        assert_eq!(rows, vec![vec!["a", ""]]);
    }

    #[test]
    fn cell_quoting() {
        let mut out = String::new();
        encode_cell("plain", &mut out);
        out.push('|');
        encode_cell("a,b", &mut out);
        out.push('|');
        encode_cell("q\"q", &mut out);
        assert_eq!(out, r#"plain|"a,b"|"q""q""#);
    }
}
