//! Element tree: the intermediate form between XML text and [`Value`](crate::Value).
//!
//! Parsing and rendering are delegated to `quick-xml`. The reader builds the
//! tree with an explicit stack, so document depth does not grow the call
//! stack.

use crate::error::{ConvertError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fmt::Display;

/// One XML element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementNode {
    pub tag: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Character content before the first child, trimmed. `None` when there
    /// is no non-whitespace content.
    pub text: Option<String>,
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&ElementNode> {
        self.children.iter().find(|c| c.tag == tag)
    }
}

/// Parse an XML document into its root element.
///
/// Declarations, comments, processing instructions and doctypes are skipped.
/// Text after a child element (tail text) is dropped; CDATA is read as text.
///
/// # Errors
///
/// [`ConvertError::Xml`] with the byte offset for mismatched or unclosed
/// tags, bad attributes or entities, a missing root element, or content after
/// the root element.
pub fn parse_document(xml: &str) -> Result<ElementNode> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<ElementNode> = Vec::new();
    let mut root: Option<ElementNode> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error(reader.error_position() as u64, e))?;

        match event {
            Event::Start(start) => {
                ensure_no_root(&reader, &root, &stack)?;
                stack.push(open_element(&reader, &start)?);
            }
            Event::Empty(start) => {
                ensure_no_root(&reader, &root, &stack)?;
                let node = open_element(&reader, &start)?;
                close_element(node, &mut stack, &mut root);
            }
            Event::End(_) => {
                // quick-xml has already checked that the end name matches
                if let Some(node) = stack.pop() {
                    close_element(node, &mut stack, &mut root);
                }
            }
            Event::Text(text) => {
                let content = text
                    .unescape()
                    .map_err(|e| xml_error(reader.buffer_position() as u64, e))?;
                append_text(&reader, &mut stack, &content)?;
            }
            Event::CData(data) => {
                let content = String::from_utf8_lossy(&data.into_inner()).into_owned();
                append_text(&reader, &mut stack, &content)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let position = reader.buffer_position() as u64;
    if let Some(open) = stack.last() {
        return Err(xml_error(
            position,
            format!("unclosed element <{}>", open.tag),
        ));
    }
    root.ok_or_else(|| xml_error(position, "no element found"))
}

/// Build a node (tag and attributes) from a start or empty-element tag.
fn open_element(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<ElementNode> {
    let mut node = ElementNode::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| xml_error(reader.buffer_position() as u64, e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| xml_error(reader.buffer_position() as u64, e))?
            .into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

/// Finish a node: trim its text and attach it to its parent, or make it the
/// root when the stack is empty.
fn close_element(
    mut node: ElementNode,
    stack: &mut [ElementNode],
    root: &mut Option<ElementNode>,
) {
    node.text = node
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

/// Add character content to the open element. Only text before the first
/// child counts; whitespace outside the root is allowed, anything else is not.
fn append_text(reader: &Reader<&[u8]>, stack: &mut [ElementNode], content: &str) -> Result<()> {
    match stack.last_mut() {
        Some(node) if node.children.is_empty() => {
            node.text.get_or_insert_with(String::new).push_str(content);
            Ok(())
        }
        Some(_) => Ok(()),
        None if content.trim().is_empty() => Ok(()),
        None => Err(xml_error(
            reader.buffer_position() as u64,
            "text outside of the root element",
        )),
    }
}

fn ensure_no_root(
    reader: &Reader<&[u8]>,
    root: &Option<ElementNode>,
    stack: &[ElementNode],
) -> Result<()> {
    if stack.is_empty() && root.is_some() {
        return Err(xml_error(
            reader.buffer_position() as u64,
            "junk after document element",
        ));
    }
    Ok(())
}

fn xml_error(position: u64, message: impl Display) -> ConvertError {
    ConvertError::Xml {
        position,
        message: message.to_string(),
    }
}

/// Render an element tree as XML text.
///
/// Pretty output starts with an XML declaration, indents nested elements by
/// two spaces, keeps text-only elements on one line and ends with a newline.
/// Compact output has no declaration and no inter-element whitespace.
/// Elements with neither text nor children are written self-closing.
/// A tag or attribute name that is not a valid XML name is a
/// [`ConvertError::Render`].
pub fn render_document(root: &ElementNode, pretty: bool) -> Result<String> {
    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };

    if pretty {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(render_error)?;
    }
    write_element(&mut writer, root)?;

    let mut out = String::from_utf8(writer.into_inner()).map_err(render_error)?;
    if pretty {
        out.push('\n');
    }
    Ok(out)
}

fn write_element(writer: &mut Writer<Vec<u8>>, node: &ElementNode) -> Result<()> {
    check_name("element", &node.tag)?;
    for (name, _) in &node.attributes {
        check_name("attribute", name)?;
    }

    let start = BytesStart::new(node.tag.as_str()).with_attributes(
        node.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );
    let text = node.text.as_deref().filter(|t| !t.is_empty());

    if text.is_none() && node.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(render_error);
    }

    writer.write_event(Event::Start(start)).map_err(render_error)?;
    if let Some(text) = text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(render_error)?;
    }
    for child in &node.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.tag.as_str())))
        .map_err(render_error)
}

/// Check a tag or attribute name against the XML `Name` production.
fn check_name(kind: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(ConvertError::Render(format!(
            "'{name}' is not a valid XML {kind} name"
        )))
    }
}

fn render_error(err: impl Display) -> ConvertError {
    ConvertError::Render(err.to_string())
}
