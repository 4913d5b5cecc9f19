//! Markup rendering for individual spans.
//!
//! Most tags render their attributes verbatim. A handful of source tags get
//! special treatment, selected by [`TagKind`]:
//!
//! - `textStyle`: only `superscript`/`strikethrough` survive, as `rend`
//! - `date`: `year`/`month`/`day` collapse into one `when="YYYY-MM-DD"`
//! - `abbrev`: wraps the text in `<abbr>` and appends `<expan>` at the end
//! - `sic`: wraps the text in `<sic>` and appends `<corr>` at the end

use super::span::{Attributes, Span};
use super::warnings::{ConversionWarning, WarningSink};

/// The literal escape Transkribus writes for a space inside attribute values.
pub const SPACE_ESCAPE: &str = concat!("\\", "u0020");

/// Attributes that never reach the output.
const SUPPRESSED: &[&str] = &["length", "offset", "expansion", "correction"];

const DATE_PARTS: &[&str] = &["year", "month", "day"];

/// Style attributes dropped without a warning.
const IGNORED_STYLE: &[&str] = &["length", "offset", "fontSize", "kerning"];

const STYLE_FLAGS: &[&str] = &["superscript", "strikethrough"];

/// Rendering behavior of a source tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Generic,
    TextStyle,
    Date,
    Abbreviation,
    Correction,
}

impl TagKind {
    pub fn of(tag_name: &str) -> Self {
        match tag_name {
            "textStyle" => TagKind::TextStyle,
            "date" => TagKind::Date,
            "abbrev" => TagKind::Abbreviation,
            "sic" => TagKind::Correction,
            _ => TagKind::Generic,
        }
    }
}

pub fn unescape_spaces(value: &str) -> String {
    value.replace(SPACE_ESCAPE, " ")
}

/// Render the attribute string of a span, leading space included.
pub fn render_attributes(span: &Span, sink: &mut dyn WarningSink) -> String {
    let mut out = String::new();
    write_attributes(&mut out, TagKind::of(&span.tag_name), &span.attributes, sink);
    out
}

/// `<name attrs>` followed by the inner opening element, if any.
pub fn write_open(out: &mut String, span: &Span, output_name: &str, sink: &mut dyn WarningSink) {
    let kind = TagKind::of(&span.tag_name);
    out.push('<');
    out.push_str(output_name);
    write_attributes(out, kind, &span.attributes, sink);
    out.push('>');
    match kind {
        TagKind::Abbreviation => out.push_str("<abbr>"),
        TagKind::Correction => out.push_str("<sic>"),
        _ => {}
    }
}

/// Inner closing sequence, if any, followed by `</name>`.
pub fn write_close(out: &mut String, span: &Span, output_name: &str, sink: &mut dyn WarningSink) {
    match TagKind::of(&span.tag_name) {
        TagKind::Abbreviation => write_split_close(
            out,
            ("abbr", "expan"),
            span.attributes.get("expansion"),
            ConversionWarning::MissingExpansion,
            sink,
        ),
        TagKind::Correction => write_split_close(
            out,
            ("sic", "corr"),
            span.attributes.get("correction"),
            ConversionWarning::MissingCorrection,
            sink,
        ),
        _ => {}
    }
    out.push_str("</");
    out.push_str(output_name);
    out.push('>');
}

/// `<name attrs/>` for a zero-length span.
pub fn write_point(out: &mut String, span: &Span, output_name: &str, sink: &mut dyn WarningSink) {
    out.push('<');
    out.push_str(output_name);
    write_attributes(out, TagKind::of(&span.tag_name), &span.attributes, sink);
    out.push_str("/>");
}

fn write_split_close(
    out: &mut String,
    (inner, replacement): (&str, &str),
    value: Option<&str>,
    missing: ConversionWarning,
    sink: &mut dyn WarningSink,
) {
    let body = match value {
        Some(value) => unescape_spaces(value),
        None => {
            sink.warn(missing);
            String::new()
        }
    };
    out.push_str(&format!("</{inner}><{replacement}>{body}</{replacement}>"));
}

fn write_attributes(
    out: &mut String,
    kind: TagKind,
    attributes: &Attributes,
    sink: &mut dyn WarningSink,
) {
    if kind == TagKind::TextStyle {
        write_style_attributes(out, attributes, sink);
        return;
    }

    for (key, value) in attributes.iter() {
        if SUPPRESSED.contains(&key) || (kind == TagKind::Date && DATE_PARTS.contains(&key)) {
            continue;
        }
        push_attribute(out, key, &unescape_spaces(value));
    }

    if kind == TagKind::Date {
        push_attribute(out, "when", &date_when(attributes, sink));
    }
}

fn write_style_attributes(out: &mut String, attributes: &Attributes, sink: &mut dyn WarningSink) {
    let mut rend = Vec::new();
    for (key, value) in attributes.iter() {
        if IGNORED_STYLE.contains(&key) {
            continue;
        }
        if STYLE_FLAGS.contains(&key) {
            if value == "true" {
                rend.push(key);
            }
            continue;
        }
        sink.warn(ConversionWarning::UnknownStyleAttribute {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    if !rend.is_empty() {
        push_attribute(out, "rend", &rend.join(" "));
    }
}

fn date_when(attributes: &Attributes, sink: &mut dyn WarningSink) -> String {
    let year = date_component(attributes, "year", sink);
    let month = date_component(attributes, "month", sink);
    let day = date_component(attributes, "day", sink);
    format!("{year:04}-{month:02}-{day:02}")
}

fn date_component(attributes: &Attributes, key: &str, sink: &mut dyn WarningSink) -> i64 {
    let Some(raw) = attributes.get(key) else {
        return 1;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        sink.warn(ConversionWarning::InvalidDateComponent {
            key: key.to_string(),
            value: raw.to_string(),
        });
        1
    })
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(value);
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::warnings::IgnoreWarnings;

    fn attrs(span: Span) -> (String, Vec<ConversionWarning>) {
        let mut warnings = Vec::new();
        let rendered = render_attributes(&span, &mut warnings);
        (rendered, warnings)
    }

    #[test]
    fn generic_attributes_skip_position_keys() {
        let span = Span::new("person", 0, 4)
            .with_attribute("firstname", "Agnes")
            .with_attribute("continued", "true");
        let (rendered, warnings) = attrs(span);
        assert_eq!(rendered, r#" firstname="Agnes" continued="true""#);
        assert!(warnings.is_empty());
    }

    #[test]
    fn expansion_and_correction_are_suppressed_everywhere() {
        let span = Span::new("place", 0, 4)
            .with_attribute("expansion", "x")
            .with_attribute("correction", "y");
        assert_eq!(attrs(span).0, "");
    }

    #[test]
    fn space_escape_becomes_a_space() {
        let value = format!("Königs{SPACE_ESCAPE}felden");
        let span = Span::new("place", 0, 4).with_attribute("placeName", value);
        assert_eq!(attrs(span).0, r#" placeName="Königs felden""#);
    }

    #[test]
    fn unescape_is_stable() {
        let once = unescape_spaces(&format!("a{SPACE_ESCAPE}b"));
        assert_eq!(once, "a b");
        assert_eq!(unescape_spaces(&once), once);
    }

    #[test]
    fn date_collapses_into_when() {
        let span = Span::new("date", 0, 3)
            .with_attribute("year", "1500")
            .with_attribute("month", "2");
        assert_eq!(attrs(span).0, r#" when="1500-02-01""#);
    }

    #[test]
    fn date_defaults_every_missing_component() {
        let (rendered, warnings) = attrs(Span::new("date", 0, 3));
        assert_eq!(rendered, r#" when="0001-01-01""#);
        assert!(warnings.is_empty());
    }

    #[test]
    fn date_keeps_other_attributes_before_when() {
        let span = Span::new("date", 0, 3)
            .with_attribute("day", "9")
            .with_attribute("dateOriginal", "1312")
            .with_attribute("year", "1312")
            .with_attribute("month", "11");
        assert_eq!(
            attrs(span).0,
            r#" dateOriginal="1312" when="1312-11-09""#
        );
    }

    #[test]
    fn invalid_date_component_warns_and_defaults() {
        let span = Span::new("date", 0, 3)
            .with_attribute("year", "13xx")
            .with_attribute("month", "4");
        let (rendered, warnings) = attrs(span);
        assert_eq!(rendered, r#" when="0001-04-01""#);
        assert_eq!(
            warnings,
            vec![ConversionWarning::InvalidDateComponent {
                key: "year".to_string(),
                value: "13xx".to_string()
            }]
        );
    }

    #[test]
    fn text_style_keeps_only_true_flags() {
        let span = Span::new("textStyle", 0, 2)
            .with_attribute("fontSize", "0.0")
            .with_attribute("kerning", "0")
            .with_attribute("superscript", "true")
            .with_attribute("strikethrough", "false");
        let (rendered, warnings) = attrs(span);
        assert_eq!(rendered, r#" rend="superscript""#);
        assert!(warnings.is_empty());
    }

    #[test]
    fn text_style_merges_both_flags() {
        let span = Span::new("textStyle", 0, 2)
            .with_attribute("strikethrough", "true")
            .with_attribute("superscript", "true");
        assert_eq!(attrs(span).0, r#" rend="strikethrough superscript""#);
    }

    #[test]
    fn text_style_warns_on_unknown_keys() {
        let span = Span::new("textStyle", 0, 2).with_attribute("bold", "true");
        let (rendered, warnings) = attrs(span);
        assert_eq!(rendered, "");
        assert_eq!(
            warnings,
            vec![ConversionWarning::UnknownStyleAttribute {
                key: "bold".to_string(),
                value: "true".to_string()
            }]
        );
    }

    #[test]
    fn abbreviation_splits_open_and_close() {
        let span = Span::new("abbrev", 0, 2).with_attribute("expansion", "ex ample");
        let mut warnings = Vec::new();
        let mut out = String::new();
        write_open(&mut out, &span, "choice", &mut warnings);
        out.push_str("xy");
        write_close(&mut out, &span, "choice", &mut warnings);
        assert_eq!(
            out,
            "<choice><abbr>xy</abbr><expan>ex ample</expan></choice>"
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn missing_correction_leaves_empty_corr() {
        let span = Span::new("sic", 0, 2);
        let mut warnings = Vec::new();
        let mut out = String::new();
        write_close(&mut out, &span, "choice", &mut warnings);
        assert_eq!(out, "</sic><corr></corr></choice>");
        assert_eq!(warnings, vec![ConversionWarning::MissingCorrection]);
    }

    #[test]
    fn correction_value_is_unescaped() {
        let span =
            Span::new("sic", 0, 2).with_attribute("correction", format!("in{SPACE_ESCAPE}fra"));
        let mut out = String::new();
        write_close(&mut out, &span, "choice", &mut IgnoreWarnings);
        assert_eq!(out, "</sic><corr>in fra</corr></choice>");
    }

    #[test]
    fn point_spans_self_close() {
        let span = Span::new("gap", 3, 0).with_attribute("reason", "illegible");
        let mut out = String::new();
        write_point(&mut out, &span, "gap", &mut IgnoreWarnings);
        assert_eq!(out, r#"<gap reason="illegible"/>"#);
    }

    #[test]
    fn kinds_key_on_source_names() {
        assert_eq!(TagKind::of("abbrev"), TagKind::Abbreviation);
        assert_eq!(TagKind::of("sic"), TagKind::Correction);
        assert_eq!(TagKind::of("textStyle"), TagKind::TextStyle);
        assert_eq!(TagKind::of("date"), TagKind::Date);
        assert_eq!(TagKind::of("choice"), TagKind::Generic);
    }
}
