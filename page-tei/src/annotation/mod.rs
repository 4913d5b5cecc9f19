//! Inline annotation interleaving.
//!
//! Transkribus stores inline annotations as character offsets in each line's
//! `custom` attribute rather than as markup. This module turns a line's text
//! plus those offsets into text with nested TEI markup:
//!
//! ```text
//! text:    "xyz"
//! custom:  "abbrev {offset:0; length:2; expansion:example;}"
//! output:  "<abbrev><abbr>xy</abbr><expan>example</expan></abbrev>z"
//! ```
//!
//! Pipeline, leaves first:
//!
//! - [`parser`]: custom string → ordered `(name, attributes)` groups
//! - [`span`]: groups with a usable `offset`/`length` become [`Span`]s
//! - [`tables`]: output names and nesting ranks per tag name
//! - [`index`]: spans bucketed by boundary, in tie-break order
//! - [`render`]: markup for one span boundary
//! - [`interleave`]: walks the text and splices markup in
//!
//! Nothing here is fatal. Recoverable conditions are reported through the
//! [`WarningSink`] the caller passes in.

pub mod index;
pub mod interleave;
pub mod parser;
pub mod render;
pub mod span;
pub mod tables;
pub mod warnings;

pub use interleave::{interleave, render_line};
pub use span::{spans_from_custom, Attributes, Span};
pub use tables::{NameTable, RankTable, TagTables};
pub use warnings::{ConversionWarning, IgnoreWarnings, TracingWarnings, WarningSink};
