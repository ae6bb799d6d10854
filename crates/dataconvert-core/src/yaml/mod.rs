//! Block-style YAML codec over [`Value`](crate::Value).
//!
//! Covers block mappings, block sequences and plain or quoted scalars. Anchors,
//! flow collections, multi-line strings and multiple documents are not read.

pub mod decoder;
pub mod encoder;

pub use decoder::decode;
pub use encoder::encode;
