//! Structural properties of the interleaver over generated lines.

use crate::common::ranked_tables;
use page_tei::annotation::{IgnoreWarnings, TagTables};
use page_tei::{interleave, Span};
use proptest::prelude::*;

const TAGS: &[&str] = &["aa", "bb", "cc", "dd"];

fn tables() -> TagTables {
    ranked_tables(&[("aa", 1), ("bb", 2), ("cc", 3), ("dd", 4)])
}

fn line_and_spans() -> impl Strategy<Value = (String, Vec<Span>)> {
    "[a-zäö ]{0,24}".prop_flat_map(|text| {
        let len = text.chars().count();
        let span = (0..TAGS.len(), 0..=len)
            .prop_flat_map(move |(tag, offset)| (Just(tag), Just(offset), 0..=len - offset))
            .prop_map(|(tag, offset, length)| Span::new(TAGS[tag], offset, length));
        (Just(text), prop::collection::vec(span, 0..8))
    })
}

/// Keep only spans that do not cross an already kept one.
fn laminar(spans: Vec<Span>) -> Vec<Span> {
    let crosses = |a: &Span, b: &Span| {
        (a.offset < b.offset && b.offset < a.end_offset() && a.end_offset() < b.end_offset())
            || (b.offset < a.offset && a.offset < b.end_offset() && b.end_offset() < a.end_offset())
    };
    let mut kept: Vec<Span> = Vec::new();
    for span in spans {
        if !kept.iter().any(|k| crosses(k, &span)) {
            kept.push(span);
        }
    }
    kept
}

fn strip_tags(markup: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

proptest! {
    #[test]
    fn text_is_preserved((text, spans) in line_and_spans()) {
        let out = interleave(&text, &spans, &tables(), &mut IgnoreWarnings);
        prop_assert_eq!(strip_tags(&out), text);
    }

    #[test]
    fn every_span_opens_and_closes_once((text, spans) in line_and_spans()) {
        let out = interleave(&text, &spans, &tables(), &mut IgnoreWarnings);
        for tag in TAGS {
            let ranged = spans.iter().filter(|s| s.tag_name == *tag && !s.is_point()).count();
            let points = spans.iter().filter(|s| s.tag_name == *tag && s.is_point()).count();
            prop_assert_eq!(out.matches(&format!("<{tag}>")).count(), ranged);
            prop_assert_eq!(out.matches(&format!("</{tag}>")).count(), ranged);
            prop_assert_eq!(out.matches(&format!("<{tag}/>")).count(), points);
        }
    }

    #[test]
    fn no_span_closes_before_it_opens((text, spans) in line_and_spans()) {
        let out = interleave(&text, &spans, &tables(), &mut IgnoreWarnings);
        for tag in TAGS {
            let open = format!("<{tag}>");
            let close = format!("</{tag}>");
            let mut depth = 0i32;
            let mut rest = out.as_str();
            while let Some(pos) = rest.find('<') {
                rest = &rest[pos..];
                if rest.starts_with(&open) {
                    depth += 1;
                } else if rest.starts_with(&close) {
                    depth -= 1;
                    prop_assert!(depth >= 0, "{} closed before opening in {}", tag, out);
                }
                rest = &rest[1..];
            }
            prop_assert_eq!(depth, 0);
        }
    }

    #[test]
    fn nested_spans_yield_well_formed_markup((text, spans) in line_and_spans()) {
        let spans = laminar(spans);
        let out = interleave(&text, &spans, &tables(), &mut IgnoreWarnings);
        let wrapped = format!("<line>{out}</line>");
        prop_assert!(
            roxmltree::Document::parse(&wrapped).is_ok(),
            "not well-formed: {}",
            wrapped
        );
    }

    #[test]
    fn input_order_does_not_matter((text, spans) in line_and_spans()) {
        let mut reversed = spans.clone();
        reversed.reverse();
        prop_assert_eq!(
            interleave(&text, &spans, &tables(), &mut IgnoreWarnings),
            interleave(&text, &reversed, &tables(), &mut IgnoreWarnings)
        );
    }
}
