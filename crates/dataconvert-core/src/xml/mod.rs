//! XML codec: `quick-xml` element trees mapped onto [`Value`].

pub mod mapping;
pub mod tree;

pub use mapping::{element_to_value, value_to_element, ATTRIBUTES_KEY, LIST_ITEM_TAG, TEXT_KEY};
pub use tree::{parse_document, render_document, ElementNode};

use crate::error::Result;
use crate::value::Value;

/// Parse an XML document into the value of its root element. The root tag
/// itself is not part of the result.
pub fn parse(xml: &str) -> Result<Value> {
    let root = parse_document(xml)?;
    Ok(element_to_value(&root))
}

/// Render a value as an XML document whose root element is `root_tag`.
/// Object keys become tag names, so each must be a valid XML name.
pub fn render(value: &Value, root_tag: &str, pretty: bool) -> Result<String> {
    render_document(&value_to_element(value, root_tag), pretty)
}
