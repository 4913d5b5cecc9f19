//! Minimal element tree for the TEI output.

#[derive(Debug, Clone, PartialEq)]
pub enum TeiNode {
    Element(Element),
    /// Character data, fully escaped on output
    Text(String),
    /// Pre-rendered inline markup; only `&` is escaped on output
    Markup(String),
}

impl From<Element> for TeiNode {
    fn from(element: Element) -> Self {
        TeiNode::Element(element)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<TeiNode>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Element::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<TeiNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(TeiNode::Text(text.into()));
        self
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(attr) => attr.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn push(&mut self, child: impl Into<TeiNode>) {
        self.children.push(child.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, skipping character data.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            TeiNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First child element named `name`.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// True when any child is character data or markup.
    pub fn is_mixed(&self) -> bool {
        self.children
            .iter()
            .any(|child| !matches!(child, TeiNode::Element(_)))
    }
}
