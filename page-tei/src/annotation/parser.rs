//! Parser for Transkribus `custom` attribute strings.
//!
//! A custom string is a run of `name {key:value; key:value;}` groups, e.g.
//!
//! ```text
//! readingOrder {index:2;} abbrev {offset:0; length:3; expansion:domini;}
//! ```
//!
//! Parsing is lenient: groups whose braces do not pair up are skipped, and
//! no attribute defaults are injected.

use super::span::Attributes;
use once_cell::sync::Lazy;
use regex::Regex;

static GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\s{};]+)\s*\{([^{}]*)\}").expect("group pattern compiles"));

static PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^:;]*):([^;]*);").expect("pair pattern compiles"));

/// One annotation group as written in the custom string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub name: String,
    pub attributes: Attributes,
}

/// Extract every well-formed group, in order, duplicates included.
pub fn parse_custom(raw: &str) -> Vec<RawTag> {
    GROUP
        .captures_iter(raw)
        .map(|group| {
            let mut attributes = Attributes::new();
            for pair in PAIR.captures_iter(&group[2]) {
                attributes.insert(pair[1].trim(), pair[2].trim());
            }
            RawTag {
                name: group[1].trim().to_string(),
                attributes,
            }
        })
        .collect()
}
