//! Conversion of Transkribus exports into TEI
//!
//!     A Transkribus export is a folder with a METS manifest and one PAGE XML file per page. This
//!     crate reads such exports and writes one TEI document per export, with facsimile zones for
//!     every region and line and the transcribed text in the body.
//!
//!     This is a pure lib: it powers page-tei-cli but makes no assumptions about a shell. No code
//!     here prints, reads env vars or exits; diagnostics go through `tracing`.
//!
//! Architecture
//!
//!     The interesting part is small: Transkribus does not store inline annotations (persons,
//!     abbreviations, dates, text styles...) as markup, but as character offsets in a `custom`
//!     attribute on each line. Rebuilding nested markup from those flat offsets is done by the
//!     annotation engine (./annotation/mod.rs). Everything else is plumbing around it.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ConvertError
//!     ├── convert.rs              # Export and batch pipeline
//!     ├── annotation              # Inline annotation engine
//!     │   ├── parser.rs           # custom attribute grammar
//!     │   ├── span.rs             # Span and ordered attributes
//!     │   ├── tables.rs           # Tag name and deepness tables
//!     │   ├── index.rs            # Spans bucketed by boundary
//!     │   ├── render.rs           # Markup for one boundary
//!     │   ├── interleave.rs       # The text walk
//!     │   └── warnings.rs         # WarningSink
//!     ├── page                    # METS and PAGE XML readers
//!     ├── tei                     # TEI tree, builder, serializer
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── engine                  # Interleaving scenarios and properties
//!     ├── export                  # Whole export conversions
//!     └── fixtures
//!         └── export_1            # mets.xml + page/*.xml
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithm
//!
//!     Spans are bucketed by start and end position. Walking the line one character at a time, at
//!     every position the spans ending there are closed, then the spans starting there are opened,
//!     then zero-length spans are emitted, then the character is copied. When several spans share a
//!     boundary, longer spans open first and later-starting spans close first, so properly nested
//!     annotations always yield nested markup. Equal spans are ordered by tag deepness, see
//!     ./annotation/tables.rs.
//!
//! Library Choices
//!
//!     XML input is read with roxmltree, which is read-only and fast; the output tree is small and
//!     written by hand (./tei/serializer.rs) because the line content is pre-rendered markup that
//!     must be spliced in verbatim.
//!
pub mod annotation;
pub mod convert;
pub mod error;
pub mod page;
pub mod tei;

pub use annotation::{interleave, render_line, NameTable, RankTable, Span, TagTables};
pub use convert::{
    convert_export, convert_folder, convert_to_file, discover_exports, output_path_for,
    BatchReport, ConvertOptions, ExportReport,
};
pub use error::ConvertError;
pub use tei::TeiDocument;
