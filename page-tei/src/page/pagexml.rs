//! PAGE XML reader.
//!
//! Extracts the image reference, the Transkribus page number, and every
//! top-level `TextRegion` of a page with its `TextLine`s.

use super::{child, children, descendant, text_of};
use crate::annotation::parser::parse_custom;
use crate::error::ConvertError;
use roxmltree::Node;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDocument {
    /// `pageNr` from `TranskribusMetadata`, when present
    pub page_nr: Option<String>,
    pub image_filename: String,
    pub image_width: String,
    pub image_height: String,
    pub regions: Vec<TextRegion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRegion {
    pub id: String,
    pub points: String,
    pub custom: Option<String>,
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLine {
    pub id: String,
    pub points: String,
    pub custom: Option<String>,
    /// Line-level `TextEquiv/Unicode` content
    pub text: Option<String>,
}

impl TextRegion {
    /// `type` of the first `structure` annotation on the region.
    pub fn structure_type(&self) -> Option<String> {
        let custom = self.custom.as_deref()?;
        parse_custom(custom)
            .into_iter()
            .filter(|tag| tag.name == "structure")
            .find_map(|tag| tag.attributes.get("type").map(str::to_string))
    }
}

pub fn parse_page(source: &str) -> Result<PageDocument, ConvertError> {
    let doc = roxmltree::Document::parse(source).map_err(|e| ConvertError::Xml(e.to_string()))?;
    let root = doc.root_element();

    let page = child(root, "Page").ok_or_else(|| ConvertError::MissingElement("Page".to_string()))?;

    let page_nr = descendant(root, "TranskribusMetadata")
        .and_then(|meta| meta.attribute("pageNr"))
        .map(str::to_string);

    let regions = children(page, "TextRegion")
        .map(read_region)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PageDocument {
        page_nr,
        image_filename: required(page, "imageFilename")?,
        image_width: required(page, "imageWidth")?,
        image_height: required(page, "imageHeight")?,
        regions,
    })
}

/// Read and parse the page file at `path`.
pub fn read_page(path: &Path) -> Result<PageDocument, ConvertError> {
    let source = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    parse_page(&source).map_err(|e| e.in_file(path))
}

fn read_region(node: Node) -> Result<TextRegion, ConvertError> {
    let lines = children(node, "TextLine")
        .map(read_line)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TextRegion {
        id: required(node, "id")?,
        points: coords(node),
        custom: node.attribute("custom").map(str::to_string),
        lines,
    })
}

fn read_line(node: Node) -> Result<TextLine, ConvertError> {
    let text = child(node, "TextEquiv")
        .and_then(|equiv| child(equiv, "Unicode"))
        .and_then(text_of);

    Ok(TextLine {
        id: required(node, "id")?,
        points: coords(node),
        custom: node.attribute("custom").map(str::to_string),
        text,
    })
}

fn coords(node: Node) -> String {
    child(node, "Coords")
        .and_then(|c| c.attribute("points"))
        .unwrap_or_default()
        .to_string()
}

fn required(node: Node, attribute: &str) -> Result<String, ConvertError> {
    node.attribute(attribute)
        .map(str::to_string)
        .ok_or_else(|| ConvertError::missing_attribute(node.tag_name().name(), attribute))
}
