//! File helpers with UTF-8 contents.

use crate::error::{ConvertError, Result};
use std::io;
use std::path::Path;

/// Read a whole file as UTF-8.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConvertError::FileNotFound(path.to_path_buf()),
        _ => ConvertError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Write `content` to a file, replacing it if it exists.
pub fn write_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, content).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })
}
