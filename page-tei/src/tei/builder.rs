//! Assembles the TEI document from a manifest and its pages.
//!
//! ```text
//! <TEI xmlns="http://www.tei-c.org/ns/1.0">
//!   <teiHeader>...</teiHeader>
//!   <facsimile>
//!     <surface xml:id="facs_1"> <graphic/> <zone rendition="TextRegion"> <zone rendition="Line"/>...
//!   </facsimile>
//!   <text>
//!     <body>
//!       <pb facs="#facs_1" xml:id="img_0001"/>
//!       <p facs="#facs_1_r1">
//!         <lb facs="#facs_1_r1l1" n="N001"/>line text with inline markup
//! ```
//!
//! Page numbers `N` are 1-based positions in the manifest. Every id is derived
//! from the page number and the PAGE region/line id, so facsimile zones and
//! body elements point at each other.

use super::nodes::{Element, TeiNode};
use crate::annotation::{render_line, TagTables, WarningSink};
use crate::page::{DocumentMetadata, PageDocument, TextRegion};

pub const TEI_NS: &str = "http://www.tei-c.org/ns/1.0";

pub const DEFAULT_PUBLISHER: &str = "tranScriptorium";

/// TEI document under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TeiDocument {
    pub header: Element,
    pub facsimile: Element,
    pub body: Element,
}

impl TeiDocument {
    pub fn new(metadata: &DocumentMetadata, publisher: &str) -> Self {
        TeiDocument {
            header: build_header(metadata, publisher),
            facsimile: Element::new("facsimile"),
            body: Element::new("body"),
        }
    }

    /// Append the facsimile surface and body content of one page.
    pub fn add_page(
        &mut self,
        page: &PageDocument,
        page_no: usize,
        tables: &TagTables,
        sink: &mut dyn WarningSink,
    ) {
        self.facsimile.push(build_surface(page, page_no));
        for element in build_page_body(page, page_no, tables, sink) {
            self.body.push(element);
        }
    }

    /// The complete `<TEI>` root element.
    pub fn to_element(&self) -> Element {
        Element::new("TEI")
            .with_attr("xmlns", TEI_NS)
            .with_child(self.header.clone())
            .with_child(self.facsimile.clone())
            .with_child(Element::new("text").with_child(self.body.clone()))
    }

    /// Serialized document, see [`super::serializer::to_xml`].
    pub fn to_xml(&self) -> String {
        super::serializer::to_xml(&self.to_element())
    }
}

pub fn build_header(metadata: &DocumentMetadata, publisher: &str) -> Element {
    let title_stmt = Element::new("titleStmt")
        .with_child(
            Element::new("title")
                .with_attr("type", "main")
                .with_text(&metadata.title),
        )
        .with_child(Element::new("principal").with_text(&metadata.uploader));

    let publication_stmt =
        Element::new("publicationStmt").with_child(Element::new("publisher").with_text(publisher));

    let series_stmt =
        Element::new("seriesStmt").with_child(Element::new("title").with_text(&metadata.collection));

    let source_desc = Element::new("sourceDesc").with_child(
        Element::new("p").with_text(format!("TRP document creator: {}", metadata.uploader)),
    );

    Element::new("teiHeader").with_child(
        Element::new("fileDesc")
            .with_child(title_stmt)
            .with_child(publication_stmt)
            .with_child(series_stmt)
            .with_child(source_desc),
    )
}

pub fn build_surface(page: &PageDocument, page_no: usize) -> Element {
    let mut surface = Element::new("surface")
        .with_attr("ulx", "0")
        .with_attr("uly", "0")
        .with_attr("lrx", &page.image_width)
        .with_attr("lry", &page.image_height)
        .with_attr("xml:id", format!("facs_{page_no}"))
        .with_child(
            Element::new("graphic")
                .with_attr("url", &page.image_filename)
                .with_attr("width", &page.image_width)
                .with_attr("height", &page.image_height),
        );

    for region in &page.regions {
        surface.push(region_zone(region, page_no));
    }
    surface
}

fn region_zone(region: &TextRegion, page_no: usize) -> Element {
    let mut zone = Element::new("zone")
        .with_attr("points", &region.points)
        .with_attr("rendition", "TextRegion")
        .with_attr("xml:id", format!("facs_{page_no}_{}", region.id));
    if let Some(subtype) = region.structure_type() {
        zone.set_attr("subtype", subtype);
    }

    for line in &region.lines {
        zone.push(
            Element::new("zone")
                .with_attr("points", &line.points)
                .with_attr("rendition", "Line")
                .with_attr("xml:id", format!("facs_{page_no}_{}", line.id)),
        );
    }
    zone
}

/// The page break followed by one paragraph per text region.
pub fn build_page_body(
    page: &PageDocument,
    page_no: usize,
    tables: &TagTables,
    sink: &mut dyn WarningSink,
) -> Vec<Element> {
    let n = page
        .page_nr
        .clone()
        .unwrap_or_else(|| page_no.to_string());
    let mut elements = vec![Element::new("pb")
        .with_attr("facs", format!("#facs_{page_no}"))
        .with_attr("n", n)
        .with_attr("xml:id", format!("img_{page_no:04}"))];

    for region in &page.regions {
        let mut p = Element::new("p").with_attr("facs", format!("#facs_{page_no}_{}", region.id));

        for (i, line) in region.lines.iter().enumerate() {
            let facs = format!("#facs_{page_no}_{}", line.id);
            p.push(
                Element::new("lb")
                    .with_attr("facs", &facs)
                    .with_attr("n", format!("N{:03}", i + 1)),
            );

            let Some(text) = line.text.as_deref().filter(|t| !t.is_empty()) else {
                continue;
            };
            let _line = tracing::debug_span!("line", facs = %facs).entered();
            let rendered = render_line(text, line.custom.as_deref(), tables, sink);
            p.push(TeiNode::Markup(rendered));
        }
        elements.push(p);
    }
    elements
}
