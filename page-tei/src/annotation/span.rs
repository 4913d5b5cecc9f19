//! Span records built from parsed annotation groups.

use super::parser::{parse_custom, RawTag};

/// Insertion-ordered string map.
///
/// Attribute order is significant: it is the order in which attributes are
/// rendered. Re-inserting a key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// One annotation over a character range of a line.
///
/// `offset` and `length` count characters, not bytes. A zero `length` marks a
/// point span. The attribute map still carries `offset`/`length` as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub tag_name: String,
    pub offset: usize,
    pub length: usize,
    pub attributes: Attributes,
}

impl Span {
    /// Build a span, recording `offset` and `length` in the attribute map.
    pub fn new(tag_name: impl Into<String>, offset: usize, length: usize) -> Self {
        let mut attributes = Attributes::new();
        attributes.insert("offset", offset.to_string());
        attributes.insert("length", length.to_string());
        Span {
            tag_name: tag_name.into(),
            offset,
            length,
            attributes,
        }
    }

    /// Add an attribute (builder style).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// Convert a parsed group into a span.
    ///
    /// Returns `None` when `offset` or `length` is absent or not a
    /// non-negative integer; such groups (reading order, structure) carry no
    /// inline position. Groups whose end does not fit in `usize` are dropped.
    pub fn from_tag(tag: RawTag) -> Option<Span> {
        let offset: usize = tag.attributes.get("offset")?.parse().ok()?;
        let length: usize = tag.attributes.get("length")?.parse().ok()?;
        offset.checked_add(length)?;
        Some(Span {
            tag_name: tag.name,
            offset,
            length,
            attributes: tag.attributes,
        })
    }

    pub fn end_offset(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    pub fn is_point(&self) -> bool {
        self.length == 0
    }
}

/// Parse a custom string and keep the groups usable as spans.
pub fn spans_from_custom(raw: &str) -> Vec<Span> {
    parse_custom(raw)
        .into_iter()
        .filter_map(Span::from_tag)
        .collect()
}
