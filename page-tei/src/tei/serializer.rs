//! XML output for the TEI element tree.
//!
//! Element-only content is indented two spaces per level. In mixed content
//! each child element starts on a fresh line and character data follows it
//! inline, which puts every `<lb/>` at the head of its line of text.

use super::nodes::{Element, TeiNode};
use crate::error::ConvertError;

const INDENT: &str = "  ";

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Serialize a complete document with declaration and trailing newline.
pub fn to_xml(root: &Element) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(DECLARATION);
    out.push('\n');
    write_element(&mut out, root, 0);
    out.push('\n');
    out
}

/// Parse `xml` again and report the first well-formedness error.
pub fn validate(xml: &str) -> Result<(), ConvertError> {
    roxmltree::Document::parse(xml)
        .map(|_| ())
        .map_err(|e| ConvertError::Xml(e.to_string()))
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Rendered line markup already holds its tags; only bare ampersands are escaped.
pub fn escape_markup(markup: &str) -> String {
    markup.replace('&', "&amp;")
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    let mixed = element.is_mixed();
    let mut broke_line = false;
    for child in &element.children {
        match child {
            TeiNode::Element(child) => {
                newline(out, depth + 1);
                write_element(out, child, depth + 1);
                broke_line = true;
            }
            TeiNode::Text(text) => out.push_str(&escape_text(text)),
            TeiNode::Markup(markup) => out.push_str(&escape_markup(markup)),
        }
    }
    if broke_line || !mixed {
        newline(out, depth);
    }

    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
