use dataconvert_core::xml::{
    element_to_value, parse, parse_document, render, value_to_element, ElementNode,
    ATTRIBUTES_KEY,
};
use dataconvert_core::{json, ConvertError, Value};

/// Helper: parse a JSON literal into a `Value`.
fn v(json_text: &str) -> Value {
    json::parse(json_text).unwrap()
}

fn assert_malformed(xml: &str) {
    match parse(xml) {
        Err(ConvertError::Xml { .. }) => {}
        other => panic!("expected an XML error for {xml:?}, got {other:?}"),
    }
}

// ============================================================================
// XML → Value
// ============================================================================

#[test]
fn parse_simple_children() {
    let value = parse("<root><name>Test</name><value>123</value></root>").unwrap();
    assert_eq!(value, v(r#"{"name":"Test","value":"123"}"#));
}

#[test]
fn parse_nested_children() {
    let value = parse("<config><database><host>localhost</host></database></config>").unwrap();
    assert_eq!(value, v(r#"{"database":{"host":"localhost"}}"#));
}

#[test]
fn parse_attributes() {
    let value = parse(r#"<item id="123" type="product"><name>Widget</name></item>"#).unwrap();
    assert_eq!(
        value,
        v(r#"{"@attributes":{"id":"123","type":"product"},"name":"Widget"}"#)
    );
}

#[test]
fn parse_repeated_tags_into_array() {
    let value = parse("<list><n>1</n><n>2</n><other>x</other><n>3</n></list>").unwrap();
    assert_eq!(value, v(r#"{"n":["1","2","3"],"other":"x"}"#));
}

#[test]
fn parse_text_with_children_keeps_text_key() {
    let value = parse("<p>intro<b>bold</b></p>").unwrap();
    assert_eq!(value, v(r##"{"#text":"intro","b":"bold"}"##));
}

#[test]
fn parse_text_only_root_collapses() {
    assert_eq!(parse("<greeting>  hello  </greeting>").unwrap(), Value::from("hello"));
}

#[test]
fn parse_empty_elements_are_null() {
    assert_eq!(parse("<a/>").unwrap(), Value::Null);
    assert_eq!(parse("<a><b></b><c/></a>").unwrap(), v(r#"{"b":null,"c":null}"#));
}

#[test]
fn parse_pretty_document_with_declaration_and_comments() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- settings -->
<settings>
  <theme>dark</theme>
  <size>12</size>
</settings>
"#;
    assert_eq!(parse(xml).unwrap(), v(r#"{"theme":"dark","size":"12"}"#));
}

#[test]
fn parse_cdata_as_text() {
    let value = parse("<a><![CDATA[1 < 2]]></a>").unwrap();
    assert_eq!(value, Value::from("1 < 2"));
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn mismatched_end_tag_is_error() {
    assert_malformed("<a><b></a>");
}

#[test]
fn unclosed_element_is_error() {
    assert_malformed("<a><b>text</b>");
}

#[test]
fn empty_document_is_error() {
    assert_malformed("");
    assert_malformed("   ");
}

#[test]
fn second_root_is_error() {
    assert_malformed("<a/><b/>");
}

#[test]
fn text_outside_root_is_error() {
    assert_malformed("<a/>trailing");
}

#[test]
fn xml_errors_are_malformed_input() {
    let err = parse("<a><b>text</b>").unwrap_err();
    assert!(err.to_string().starts_with("Invalid XML at byte"), "{err}");
    assert!(err.is_malformed_input());
}

// ============================================================================
// Value → XML
// ============================================================================

#[test]
fn render_compact() {
    let xml = render(&v(r#"{"name":"Test","value":"123"}"#), "root", false).unwrap();
    assert_eq!(xml, "<root><name>Test</name><value>123</value></root>");
}

#[test]
fn render_pretty_has_declaration_and_indentation() {
    let xml = render(&v(r#"{"item":"value"}"#), "root", true).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("\n  <item>value</item>\n"), "{xml}");
    assert!(xml.ends_with("</root>\n"));
}

#[test]
fn render_arrays_unfold_under_key() {
    let xml = render(&v(r#"{"n":[1,2]}"#), "list", false).unwrap();
    assert_eq!(xml, "<list><n>1</n><n>2</n></list>");
}

#[test]
fn render_bare_array_uses_item_tags() {
    let xml = render(&v(r#"["a",null,true]"#), "root", false).unwrap();
    assert_eq!(xml, "<root><item>a</item><item/><item>true</item></root>");
}

#[test]
fn render_attributes_and_text() {
    let xml = render(
        &v(r##"{"@attributes":{"id":7,"lang":"en"},"#text":"hi & bye"}"##),
        "msg",
        false,
    )
    .unwrap();
    assert_eq!(xml, r#"<msg id="7" lang="en">hi &amp; bye</msg>"#);
}

#[test]
fn render_scalar_root() {
    assert_eq!(render(&Value::Float(1.5), "n", false).unwrap(), "<n>1.5</n>");
    assert_eq!(render(&Value::Null, "n", false).unwrap(), "<n/>");
}

#[test]
fn render_rejects_keys_that_are_not_xml_names() {
    for json_text in [
        r#"{"first name":"Alice"}"#,
        r#"{"2nd":"x"}"#,
        r#"{"a":{"":1}}"#,
    ] {
        match render(&v(json_text), "root", true) {
            Err(ConvertError::Render(message)) => {
                assert!(message.contains("not a valid XML element name"), "{message}")
            }
            other => panic!("expected a render error for {json_text}, got {other:?}"),
        }
    }
}

#[test]
fn render_rejects_invalid_attribute_names() {
    let err = render(&v(r#"{"@attributes":{"data id":"1"}}"#), "root", false).unwrap_err();
    assert!(matches!(err, ConvertError::Render(_)));
    assert!(err.to_string().contains("'data id'"), "{err}");
}

#[test]
fn render_rejects_invalid_root_tag() {
    let err = render(&v(r#"{"a":1}"#), "my root", false).unwrap_err();
    assert!(err.to_string().contains("'my root'"), "{err}");
}

#[test]
fn rendered_names_parse_back() {
    let value = v(r#"{"ns:tag":{"@attributes":{"data-id":"1"},"_v.2":"x"}}"#);
    let xml = render(&value, "root", false).unwrap();
    assert_eq!(parse(&xml).unwrap(), value);
}

// ============================================================================
// Element ↔ Value
// ============================================================================

#[test]
fn element_roundtrip_keeps_tags_and_attributes() {
    let root = parse_document(
        r#"<order id="42"><line sku="a">2</line><line sku="b">1</line><note>rush</note><gift/></order>"#,
    )
    .unwrap();

    let value = element_to_value(&root);
    assert!(value.as_object().unwrap().contains_key(ATTRIBUTES_KEY));

    let rebuilt = value_to_element(&value, &root.tag);
    assert_eq!(rebuilt, root);
}

#[test]
fn empty_element_roundtrips_through_null() {
    let node = ElementNode::new("empty");
    let value = element_to_value(&node);
    assert_eq!(value, Value::Null);
    assert_eq!(value_to_element(&value, "empty"), node);
}

#[test]
fn text_leaf_roundtrips_through_string() {
    let root = parse_document("<title>Dune</title>").unwrap();
    let value = element_to_value(&root);
    assert_eq!(value, Value::from("Dune"));
    assert_eq!(value_to_element(&value, "title"), root);
}
