//! # dataconvert-core
//!
//! Convert documents between **JSON**, **CSV**, **XML** and **YAML**.
//!
//! Every format is parsed into one shared [`Value`] model and rendered back
//! out from it, so any source format can reach any target format.
//!
//! ## Quick start
//!
//! ```rust
//! use dataconvert_core::convert;
//!
//! // JSON → YAML
//! let json = r#"{"server":{"host":"localhost","port":8080}}"#;
//! let yaml = convert("json", "yaml", json, "root").unwrap();
//! assert_eq!(yaml, "server:\n  host: localhost\n  port: 8080");
//!
//! // XML → JSON: the content is wrapped under the root name
//! let json = convert("xml", "json", "<data><name>Test</name></data>", "root").unwrap();
//! let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
//! assert_eq!(parsed["root"]["name"], "Test");
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` / `Map`, the shared model
//! - [`yaml`]: indentation-based YAML decoder and encoder
//! - [`xml`]: element trees (`quick-xml`) and the element ↔ value mapping
//! - [`csv`]: header + records codec
//! - [`json`]: `serde_json` bridge
//! - [`convert`]: format dispatch and root wrapping
//! - [`format`]: `Format` tags and `ConvertOptions`
//! - [`fs`]: file read/write helpers
//! - [`error`]: error types

pub mod convert;
pub mod csv;
pub mod error;
pub mod format;
pub mod fs;
pub mod json;
pub mod value;
pub mod xml;
pub mod yaml;

pub use convert::{convert, convert_with, parse, render};
pub use error::{ConvertError, Result};
pub use format::{ConvertOptions, Format};
pub use fs::{read_file, write_file};
pub use value::{Map, Value};
