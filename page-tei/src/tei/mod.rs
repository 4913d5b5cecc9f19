//! TEI document model, assembly and serialization.

pub mod builder;
pub mod nodes;
pub mod serializer;

pub use builder::{
    build_header, build_page_body, build_surface, TeiDocument, DEFAULT_PUBLISHER, TEI_NS,
};
pub use nodes::{Element, TeiNode};
pub use serializer::{to_xml, validate};
