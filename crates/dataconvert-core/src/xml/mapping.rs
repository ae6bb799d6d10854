//! Mapping between element trees and [`Value`]s.
//!
//! Element → value:
//!
//! - attributes go under `"@attributes"` as an object of strings
//! - non-empty text goes under `"#text"`
//! - children go under their tag; repeated tags fold into an array
//! - an element whose only entry is `"#text"` collapses to that string
//! - an element with no attributes, text or children becomes null
//!
//! Value → element is the inverse: arrays under a key unfold into repeated
//! children with that tag, bare arrays use `<item>` children, scalars become
//! text.
//!
//! The reserved keys are not escaped. A value with a real `"#text"` or
//! `"@attributes"` key is read as text or attributes.

use crate::value::{Map, Value};
use crate::xml::tree::ElementNode;

/// Key holding an element's attributes.
pub const ATTRIBUTES_KEY: &str = "@attributes";
/// Key holding an element's text when it also has attributes or children.
pub const TEXT_KEY: &str = "#text";
/// Tag used for the children of a bare array.
pub const LIST_ITEM_TAG: &str = "item";

/// Convert an element (without its own tag) into a value.
pub fn element_to_value(node: &ElementNode) -> Value {
    let mut map = Map::with_capacity(node.children.len() + 2);

    if !node.attributes.is_empty() {
        let attributes: Map = node
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        map.insert(ATTRIBUTES_KEY, Value::Object(attributes));
    }

    if let Some(text) = node.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        map.insert(TEXT_KEY, Value::String(text.to_string()));
    }

    for child in &node.children {
        let value = element_to_value(child);
        match map.get_mut(&child.tag) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, Value::Null);
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(child.tag.clone(), value);
            }
        }
    }

    if map.len() == 1 {
        if let Some(text) = map.get(TEXT_KEY) {
            return text.clone();
        }
    }

    if map.is_empty() {
        Value::Null
    } else {
        Value::Object(map)
    }
}

/// Convert a value into an element with the given tag.
///
/// A `"@attributes"` entry that is not an object is dropped. Never fails.
pub fn value_to_element(value: &Value, tag: &str) -> ElementNode {
    let mut node = ElementNode::new(tag);

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(attributes)) = map.get(ATTRIBUTES_KEY) {
                node.attributes = attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_text()))
                    .collect();
            }

            for (key, child) in map {
                match (key.as_str(), child) {
                    (ATTRIBUTES_KEY, _) => {}
                    (TEXT_KEY, text) => node.text = Some(text.to_text()),
                    (_, Value::Array(items)) => node
                        .children
                        .extend(items.iter().map(|item| value_to_element(item, key))),
                    _ => node.children.push(value_to_element(child, key)),
                }
            }
        }
        Value::Array(items) => {
            node.children = items
                .iter()
                .map(|item| value_to_element(item, LIST_ITEM_TAG))
                .collect();
        }
        scalar => {
            let text = scalar.to_text();
            node.text = (!text.is_empty()).then_some(text);
        }
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str, text: &str) -> ElementNode {
        ElementNode {
            text: Some(text.to_string()),
            ..ElementNode::new(tag)
        }
    }

    #[test]
    fn repeated_tags_fold_into_array() {
        let mut root = ElementNode::new("list");
        root.children = vec![leaf("n", "1"), leaf("n", "2"), leaf("n", "3")];

        let value = element_to_value(&root);
        let items = value.as_object().unwrap().get("n").unwrap();
        assert_eq!(
            items,
            &Value::Array(vec![Value::from("1"), Value::from("2"), Value::from("3")])
        );
    }

    #[test]
    fn text_leaf_collapses_to_string() {
        assert_eq!(element_to_value(&leaf("a", " hi ")), Value::from("hi"));
    }

    #[test]
    fn empty_element_is_null() {
        assert_eq!(element_to_value(&ElementNode::new("a")), Value::Null);
    }

    #[test]
    fn text_with_attributes_keeps_both_keys() {
        let mut node = leaf("price", "9.99");
        node.attributes.push(("currency".to_string(), "EUR".to_string()));

        let value = element_to_value(&node);
        let map = value.as_object().unwrap();
        assert_eq!(map.get(TEXT_KEY), Some(&Value::from("9.99")));
        assert_eq!(
            map.get(ATTRIBUTES_KEY)
                .and_then(Value::as_object)
                .and_then(|a| a.get("currency")),
            Some(&Value::from("EUR"))
        );
    }

    #[test]
    fn bare_array_uses_item_children() {
        let value = Value::Array(vec![Value::Integer(1), Value::Bool(true)]);
        let node = value_to_element(&value, "root");
        assert_eq!(node.children.len(), 2);
        assert!(node.children.iter().all(|c| c.tag == LIST_ITEM_TAG));
        assert_eq!(node.children[1].text.as_deref(), Some("true"));
    }

    #[test]
    fn null_becomes_empty_element() {
        assert_eq!(value_to_element(&Value::Null, "a"), ElementNode::new("a"));
    }

    #[test]
    fn non_object_attributes_are_dropped() {
        let mut map = Map::new();
        map.insert(ATTRIBUTES_KEY, Value::from("oops"));
        map.insert("b", Value::from("x"));

        let node = value_to_element(&Value::Object(map), "a");
        assert!(node.attributes.is_empty());
        assert_eq!(node.children, vec![leaf("b", "x")]);
    }
}
