//! Conversion facade: parse with the source codec, render with the target.
//!
//! XML needs a root element that the other formats do not have, so:
//!
//! - XML input is wrapped as `{root_name: <root element value>}`
//! - XML output unwraps a single-entry object, using its key as the root tag;
//!   any other value is rendered under `root_name`
//!
//! CSV output needs records, so a bare object is rendered as a single record.

use crate::error::{ConvertError, Result};
use crate::format::{ConvertOptions, Format};
use crate::value::{Map, Value};
use crate::{csv, json, xml, yaml};
use tracing::debug;

/// Parse `input` as `format` into a [`Value`].
pub fn parse(format: Format, input: &str, options: &ConvertOptions) -> Result<Value> {
    debug!(%format, bytes = input.len(), "parsing input");
    let value = match format {
        Format::Json => json::parse(input)?,
        Format::Csv => csv::parse_records(input)?,
        Format::Xml => {
            let content = xml::parse(input)?;
            let mut wrapped = Map::new();
            wrapped.insert(options.root_name.clone(), content);
            Value::Object(wrapped)
        }
        Format::Yaml => yaml::decode(input),
    };
    Ok(value)
}

/// Render `value` as `format`.
pub fn render(format: Format, value: &Value, options: &ConvertOptions) -> Result<String> {
    debug!(%format, kind = value.kind(), pretty = options.pretty, "rendering output");
    match format {
        Format::Json => json::render(value, options.pretty),
        Format::Csv => match value {
            Value::Array(records) => csv::render_records(records),
            Value::Object(_) => csv::render_records(std::slice::from_ref(value)),
            other => Err(ConvertError::Render(format!(
                "CSV output needs an array of objects, got {}",
                other.kind()
            ))),
        },
        Format::Xml => match value.as_object().and_then(Map::single_entry) {
            Some((root_tag, content)) => xml::render(content, root_tag, options.pretty),
            None => xml::render(value, &options.root_name, options.pretty),
        },
        Format::Yaml => Ok(yaml::encode(value)),
    }
}

/// Convert `input` from `source` to `target`.
pub fn convert_with(
    source: Format,
    target: Format,
    input: &str,
    options: &ConvertOptions,
) -> Result<String> {
    let value = parse(source, input, options)?;
    render(target, &value, options)
}

/// Convert between format tags (`json`, `csv`, `xml`, `yaml`) with pretty
/// output.
///
/// # Errors
///
/// [`ConvertError::UnsupportedFormat`] when either tag is unknown; otherwise
/// whatever the source parser or target renderer reports.
pub fn convert(source: &str, target: &str, input: &str, root_name: &str) -> Result<String> {
    let source: Format = source.parse()?;
    let target: Format = target.parse()?;
    let options = ConvertOptions::default().with_root_name(root_name);
    convert_with(source, target, input, &options)
}
