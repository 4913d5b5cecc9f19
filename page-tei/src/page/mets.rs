//! METS manifest reader.
//!
//! Collects the PAGE XML files listed in the `fileSec` and the document
//! metadata Transkribus embeds as `trpDocMetadata` in the `amdSec`.

use super::{child, children, descendant, text_of};
use crate::error::ConvertError;
use roxmltree::Node;
use std::path::{Path, PathBuf};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Header fields taken from `trpDocMetadata`. Absent fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: String,
    pub uploader: String,
    /// Name of the first collection the document belongs to
    pub collection: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub metadata: DocumentMetadata,
    /// Page file references as written in the manifest, in order
    pub pages: Vec<String>,
}

impl Manifest {
    /// Page file references resolved against the manifest's folder.
    pub fn page_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.pages.iter().map(|href| base.join(href)).collect()
    }
}

pub fn parse_mets(source: &str) -> Result<Manifest, ConvertError> {
    let doc = roxmltree::Document::parse(source).map_err(|e| ConvertError::Xml(e.to_string()))?;

    let root = doc.root_element();
    if root.tag_name().name() != "mets" {
        return Err(ConvertError::MissingElement("mets".to_string()));
    }

    let metadata = descendant(root, "trpDocMetadata")
        .map(read_metadata)
        .unwrap_or_default();

    let pages = children(root, "fileSec")
        .flat_map(|sec| sec.descendants())
        .filter(|n| n.is_element() && n.tag_name().name() == "file")
        .filter_map(page_reference)
        .collect();

    Ok(Manifest { metadata, pages })
}

/// Read and parse the manifest at `path`.
pub fn read_mets(path: &Path) -> Result<Manifest, ConvertError> {
    let source = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    parse_mets(&source).map_err(|e| e.in_file(path))
}

fn read_metadata(node: Node) -> DocumentMetadata {
    let field = |name: &str| child(node, name).and_then(text_of).unwrap_or_default();

    // Only the first listed collection is used
    let collection = child(node, "collectionList")
        .and_then(|list| child(list, "colList"))
        .and_then(|col| child(col, "colName"))
        .and_then(text_of)
        .unwrap_or_default();

    DocumentMetadata {
        title: field("title"),
        uploader: field("uploader"),
        collection,
    }
}

/// The `FLocat` reference of a `file` entry, if it points at page XML.
fn page_reference(file: Node) -> Option<String> {
    let locator = child(file, "FLocat")?;
    let href = locator
        .attribute((XLINK_NS, "href"))
        .or_else(|| locator.attribute("href"))?;

    let is_xml = match file.attribute("MIMETYPE") {
        Some(mime) => mime.ends_with("xml"),
        None => href.to_ascii_lowercase().ends_with(".xml"),
    };
    if !is_xml {
        tracing::debug!(href, "skipping non-XML file entry");
        return None;
    }
    Some(href.to_string())
}
