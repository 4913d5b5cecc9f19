//! Line rendering with the shipped tag tables.

use crate::common::{ranked_tables, transkribus_tables};
use insta::assert_snapshot;
use page_tei::annotation::render::SPACE_ESCAPE;
use page_tei::annotation::{ConversionWarning, IgnoreWarnings, TagTables};
use page_tei::{interleave, render_line, Span};

fn line(text: &str, custom: &str) -> String {
    render_line(text, Some(custom), &transkribus_tables(), &mut IgnoreWarnings)
}

#[test]
fn date_collapses_into_when() {
    assert_snapshot!(
        line("abc", "date {offset:0;length:3;year:1500;month:2;}"),
        @r#"<date when="1500-02-01">abc</date>"#
    );
}

#[test]
fn abbreviation_becomes_choice() {
    assert_snapshot!(
        line("xyz", "abbrev {offset:0;length:2;expansion:example;}"),
        @"<choice><abbr>xy</abbr><expan>example</expan></choice>z"
    );
}

#[test]
fn correction_becomes_choice() {
    assert_snapshot!(
        line("In gotz namen", "sic {offset:3;length:4;correction:gottes;}"),
        @"In <choice><sic>gotz</sic><corr>gottes</corr></choice> namen"
    );
}

#[test]
fn point_after_last_character() {
    assert_snapshot!(line("ab", "pb {offset:2;length:0;}"), @"ab<pb/>");
}

#[test]
fn reading_order_and_structure_are_not_spans() {
    assert_snapshot!(
        line("plain", "readingOrder {index:3;} structure {type:heading;}"),
        @"plain"
    );
}

#[test]
fn deeper_tag_wraps_equal_span() {
    assert_snapshot!(
        line(
            "Agnes",
            "textStyle {offset:0;length:5;superscript:true;} person {offset:0;length:5;firstname:Agnes;}"
        ),
        @r#"<persName firstname="Agnes"><hi rend="superscript">Agnes</hi></persName>"#
    );
}

#[test]
fn longer_span_wraps_regardless_of_deepness() {
    assert_snapshot!(
        line(
            "Kunigsuelt",
            "person {offset:0;length:5;} textStyle {offset:0;length:10;strikethrough:true;}"
        ),
        @r#"<hi rend="strikethrough"><persName>Kunig</persName>suelt</hi>"#
    );
}

#[test]
fn escaped_spaces_in_attribute_values() {
    let custom = format!("person {{offset:0;length:5;lastname:von{SPACE_ESCAPE}Ungarn;}}");
    assert_snapshot!(
        line("Agnes", &custom),
        @r#"<persName lastname="von Ungarn">Agnes</persName>"#
    );
}

#[test]
fn unknown_tags_rank_above_known_ones_in_order_seen() {
    let tables = transkribus_tables();
    let spans = vec![Span::new("foo", 0, 3), Span::new("bar", 0, 3)];
    let out = interleave("abc", &spans, &tables, &mut IgnoreWarnings);
    assert_eq!(out, "<bar><foo>abc</foo></bar>");
    assert_eq!(tables.ranks.peek("foo"), Some(5));
    assert_eq!(tables.ranks.peek("bar"), Some(6));
}

#[test]
fn allocated_ranks_persist_across_lines() {
    let tables = TagTables::default();
    render_line("a", Some("first {offset:0;length:1;}"), &tables, &mut IgnoreWarnings);
    let out = render_line(
        "a",
        Some("second {offset:0;length:1;} first {offset:0;length:1;}"),
        &tables,
        &mut IgnoreWarnings,
    );
    assert_eq!(out, "<second><first>a</first></second>");
}

#[test]
fn points_at_one_position_follow_deepness() {
    let tables = ranked_tables(&[("gap", 1), ("note", 2)]);
    let spans = vec![Span::new("gap", 1, 0), Span::new("note", 1, 0)];
    assert_eq!(
        interleave("ab", &spans, &tables, &mut IgnoreWarnings),
        "a<note/><gap/>b"
    );
}

#[test]
fn adjacent_spans_close_before_opening() {
    assert_snapshot!(
        line("Brugg Bern", "place {offset:0;length:5;} place {offset:5;length:5;}"),
        @"<placeName>Brugg</placeName><placeName> Bern</placeName>"
    );
}

#[test]
fn warnings_are_reported_without_changing_output() {
    let mut warnings = Vec::new();
    let out = render_line(
        "ab",
        Some("textStyle {offset:0;length:2;bold:true;} date {offset:0;length:2;year:12th;}"),
        &transkribus_tables(),
        &mut warnings,
    );
    assert_eq!(out, r#"<date when="0001-01-01"><hi>ab</hi></date>"#);
    assert_eq!(
        warnings,
        vec![
            ConversionWarning::InvalidDateComponent {
                key: "year".to_string(),
                value: "12th".to_string()
            },
            ConversionWarning::UnknownStyleAttribute {
                key: "bold".to_string(),
                value: "true".to_string()
            },
        ]
    );
}
