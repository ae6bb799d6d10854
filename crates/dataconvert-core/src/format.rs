//! Format tags and conversion options.

use crate::error::{ConvertError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One of the four supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Csv,
    Xml,
    Yaml,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Json, Format::Csv, Format::Xml, Format::Yaml];

    /// The lowercase tag (`json`, `csv`, `xml`, `yaml`).
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Xml => "xml",
            Format::Yaml => "yaml",
        }
    }

    /// Format for a file extension (without the dot). Accepts `yml` as well
    /// as the four tags, case-insensitively.
    pub fn from_extension(ext: &str) -> Result<Format> {
        if ext.eq_ignore_ascii_case("yml") {
            return Ok(Format::Yaml);
        }
        ext.parse()
    }

    /// Format for a path, from its extension.
    pub fn from_path(path: &Path) -> Result<Format> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConvertError::UnsupportedFormat(path.display().to_string()))?;
        Format::from_extension(ext)
    }

    /// Comma-separated list of all tags, for help and error messages.
    pub fn supported() -> String {
        Format::ALL.map(Format::as_str).join(", ")
    }
}

impl FromStr for Format {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Format::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConvertError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options that shape a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Key that wraps parsed XML content, and the root tag for XML output
    /// when the value is not a single-entry object.
    pub root_name: String,
    /// Indented JSON and XML output.
    pub pretty: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            root_name: "root".to_string(),
            pretty: true,
        }
    }
}

impl ConvertOptions {
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
