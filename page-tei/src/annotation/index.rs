//! Buckets a line's spans by the character position of their boundaries.
//!
//! Three views are built over the same spans:
//!
//! - opening: ranged spans keyed by `offset`
//! - closing: ranged spans keyed by `offset + length`
//! - points: zero-length spans keyed by `offset`
//!
//! Within a bucket the order decides how coinciding tags nest, see
//! [`opening_order`] and [`closing_order`].
//!
//! Ranks are resolved once per span, point spans first (input order), then
//! ranged spans by ascending offset (input order among equal offsets). Since
//! unknown names are allocated on first lookup, this order fixes which of two
//! unconfigured tags ends up deeper.

use super::span::Span;
use super::tables::RankTable;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A span paired with the rank of its tag name.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    pub span: &'a Span,
    pub rank: i64,
}

/// Order of spans opening at the same position.
///
/// Longer spans first, so that they enclose the shorter ones. Equal lengths
/// fall back to rank, larger deepness first.
pub fn opening_order(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
    b.span
        .length
        .cmp(&a.span.length)
        .then_with(|| b.rank.cmp(&a.rank))
}

/// Order of spans closing at the same position.
///
/// Spans that started later close first. Equal starts fall back to rank,
/// smaller deepness first, mirroring [`opening_order`].
pub fn closing_order(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
    b.span
        .offset
        .cmp(&a.span.offset)
        .then_with(|| a.rank.cmp(&b.rank))
}

#[derive(Debug, Default)]
pub struct SpanIndex<'a> {
    opening: BTreeMap<usize, Vec<Ranked<'a>>>,
    closing: BTreeMap<usize, Vec<Ranked<'a>>>,
    points: BTreeMap<usize, Vec<Ranked<'a>>>,
}

impl<'a> SpanIndex<'a> {
    pub fn build(spans: &'a [Span], ranks: &RankTable) -> Self {
        let rank = |span: &'a Span| Ranked {
            span,
            rank: ranks.rank_of(&span.tag_name),
        };

        let points: Vec<Ranked<'a>> = spans.iter().filter(|s| s.is_point()).map(rank).collect();

        let mut ranged: Vec<&'a Span> = spans.iter().filter(|s| !s.is_point()).collect();
        ranged.sort_by_key(|s| s.offset);
        let ranged: Vec<Ranked<'a>> = ranged.into_iter().map(rank).collect();

        let mut index = SpanIndex::default();
        for entry in points {
            index.points.entry(entry.span.offset).or_default().push(entry);
        }
        for entry in ranged {
            index.opening.entry(entry.span.offset).or_default().push(entry);
            index
                .closing
                .entry(entry.span.end_offset())
                .or_default()
                .push(entry);
        }

        // sort_by is stable: full ties keep input order
        for bucket in index.opening.values_mut().chain(index.points.values_mut()) {
            bucket.sort_by(opening_order);
        }
        for bucket in index.closing.values_mut() {
            bucket.sort_by(closing_order);
        }
        index
    }

    pub fn opening_at(&self, pos: usize) -> &[Ranked<'a>] {
        self.opening.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn closing_at(&self, pos: usize) -> &[Ranked<'a>] {
        self.closing.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn points_at(&self, pos: usize) -> &[Ranked<'a>] {
        self.points.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Largest boundary position of any span.
    pub fn last_boundary(&self) -> Option<usize> {
        [&self.opening, &self.closing, &self.points]
            .into_iter()
            .filter_map(|bucket| bucket.keys().next_back().copied())
            .max()
    }
}
