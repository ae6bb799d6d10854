//! Error types for parsing, rendering and file access.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a conversion.
///
/// The block-format codec and the element mapping never produce errors; every
/// failure here originates at a format boundary (dispatch, a delegated
/// parser or writer) or at the file system.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A format tag or file extension that none of the codecs handle.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The input was not valid JSON. Line and column come from `serde_json`.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input was not well-formed XML.
    /// `position` is the byte offset where the reader stopped.
    #[error("Invalid XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// The input was not valid CSV. Includes the 1-based line number.
    #[error("Invalid CSV at line {line}: {message}")]
    Csv { line: usize, message: String },

    /// The value could not be written in the requested output format.
    #[error("Render error: {0}")]
    Render(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// True for syntax errors reported by one of the input parsers.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ConvertError::Json(_) | ConvertError::Xml { .. } | ConvertError::Csv { .. }
        )
    }
}

/// Convenience alias used throughout dataconvert-core.
pub type Result<T> = std::result::Result<T, ConvertError>;
