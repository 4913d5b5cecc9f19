//! Readers for Transkribus exports.
//!
//! An export is a folder holding a METS manifest (`mets.xml`) that lists one
//! PAGE XML file per scanned page. Only the pieces the TEI builder needs are
//! extracted; elements are matched by local name so both namespaced and
//! un-namespaced variants of the formats are accepted.

pub mod mets;
pub mod pagexml;

pub use mets::{parse_mets, read_mets, DocumentMetadata, Manifest};
pub use pagexml::{parse_page, read_page, PageDocument, TextLine, TextRegion};

use roxmltree::Node;

/// First element child with the given local name.
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// All element children with the given local name.
pub(crate) fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// First descendant element (or the node itself) with the given local name.
pub(crate) fn descendant<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Concatenated text of a node's direct text children, or `None` if empty.
pub(crate) fn text_of(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    (!text.is_empty()).then_some(text)
}
