//! Weaves span markup into a line of plain text.
//!
//! # The Algorithm
//!
//! 1. **Indexing:** bucket the spans by boundary position (see
//!    [`SpanIndex`]), resolving every tag's rank on the way.
//!
//! 2. **Walking:** visit each character position `pos` in increasing order,
//!    including the position just past the last character. At each one:
//!    - close every span ending at `pos`
//!    - open every ranged span starting at `pos`
//!    - emit every point span anchored at `pos`
//!    - copy the character at `pos`, if there is one
//!
//! 3. **Completion:** the extra final position lets spans ending at, and
//!    point markers placed after, the last character be emitted.
//!
//! Properly nested spans yield well-formed markup. Spans that cross each other
//! are emitted as they fall and produce markup that does not nest; nothing
//! here detects that, the assembled document is validated instead.

use super::index::SpanIndex;
use super::render::{write_close, write_open, write_point};
use super::span::{spans_from_custom, Span};
use super::tables::TagTables;
use super::warnings::WarningSink;

/// Render `text` with the markup for `spans` interleaved.
pub fn interleave(
    text: &str,
    spans: &[Span],
    tables: &TagTables,
    sink: &mut dyn WarningSink,
) -> String {
    let index = SpanIndex::build(spans, &tables.ranks);
    let mut out = String::with_capacity(text.len() + spans.len() * 16);

    let mut length = 0;
    for (pos, ch) in text.chars().enumerate() {
        emit_boundaries(&mut out, &index, pos, tables, sink);
        out.push(ch);
        length = pos + 1;
    }
    emit_boundaries(&mut out, &index, length, tables, sink);

    if let Some(last) = index.last_boundary().filter(|last| *last > length) {
        tracing::debug!(
            last,
            length,
            "span boundary past end of line, markup left unbalanced"
        );
    }

    out
}

/// Parse a line's custom attribute and render its text.
pub fn render_line(
    text: &str,
    custom: Option<&str>,
    tables: &TagTables,
    sink: &mut dyn WarningSink,
) -> String {
    let spans = custom.map(spans_from_custom).unwrap_or_default();
    interleave(text, &spans, tables, sink)
}

fn emit_boundaries(
    out: &mut String,
    index: &SpanIndex<'_>,
    pos: usize,
    tables: &TagTables,
    sink: &mut dyn WarningSink,
) {
    for entry in index.closing_at(pos) {
        let name = tables.names.convert(&entry.span.tag_name);
        write_close(out, entry.span, name, sink);
    }
    for entry in index.opening_at(pos) {
        let name = tables.names.convert(&entry.span.tag_name);
        write_open(out, entry.span, name, sink);
    }
    for entry in index.points_at(pos) {
        let name = tables.names.convert(&entry.span.tag_name);
        write_point(out, entry.span, name, sink);
    }
}
