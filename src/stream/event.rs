//! Owned XML event model.
//!
//! Events are produced by [`EventStream`](super::EventStream), rewritten by
//! the processors and consumed by [`EventSink`](super::EventSink). They are
//! never mutated in place; processors build new events instead.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A qualified XML name: namespace URI, local name and an optional prefix.
///
/// Two names are equal when their namespace URI and local name match. The
/// prefix only affects how the name is serialized.
#[derive(Debug, Clone, Eq)]
pub struct TagName {
    pub local_name: String,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
}

impl TagName {
    /// Create a namespaced name without a prefix.
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            namespace: Some(namespace.into()),
            prefix: None,
        }
    }

    /// Create a name with no namespace (e.g. an unprefixed attribute).
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            namespace: None,
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// The namespace URI, or `""` when the name has none.
    pub fn namespace_uri(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }
}

impl PartialEq for TagName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace_uri() == other.namespace_uri() && self.local_name == other.local_name
    }
}

impl Hash for TagName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace_uri().hash(state);
        self.local_name.hash(state);
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => write!(f, "{}:{}", prefix, self.local_name),
            _ => write!(f, "{}", self.local_name),
        }
    }
}

/// An attribute on a start element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: TagName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: TagName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// Create an unprefixed attribute such as `id` or `fill`.
    pub fn local(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(TagName::local(local_name), value)
    }
}

/// Prefix to URI bindings.
///
/// On a [`StartElement`] read from a document these are the element's own
/// declarations, not everything in scope. The empty prefix is the default
/// namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces(BTreeMap<String, String>);

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `prefix` to `uri`, replacing any existing binding.
    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.0.insert(prefix.into(), uri.into());
        self
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bindings that are new or rebound relative to the enclosing `scope`.
    pub fn declared_since(&self, scope: &Namespaces) -> Namespaces {
        self.0
            .iter()
            .filter(|(prefix, uri)| scope.get(prefix) != Some(uri.as_str()))
            .map(|(prefix, uri)| (prefix.clone(), uri.clone()))
            .collect::<BTreeMap<_, _>>()
            .into()
    }
}

impl From<BTreeMap<String, String>> for Namespaces {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<Namespaces> for BTreeMap<String, String> {
    fn from(namespaces: Namespaces) -> Self {
        namespaces.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartElement {
    pub name: TagName,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    pub namespace: Namespaces,
}

impl StartElement {
    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &TagName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| &a.name == name)
            .map(|a| a.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndElement {
    pub name: TagName,
}

/// The kind of an XML event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StartElement,
    EndElement,
    ProcessingInstruction,
    Characters,
    Comment,
    Whitespace,
    StartDocument,
    EndDocument,
    Dtd,
    CData,
    EntityReference,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::StartElement => "start-element",
            EventKind::EndElement => "end-element",
            EventKind::ProcessingInstruction => "processing-instruction",
            EventKind::Characters => "characters",
            EventKind::Comment => "comment",
            EventKind::Whitespace => "whitespace",
            EventKind::StartDocument => "start-document",
            EventKind::EndDocument => "end-document",
            EventKind::Dtd => "dtd",
            EventKind::CData => "cdata",
            EventKind::EntityReference => "entity-reference",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event whose payload the pipeline carries but never inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    pub kind: EventKind,
    pub raw: String,
}

/// One structural token of an XML stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartElement(StartElement),
    EndElement(EndElement),
    Characters(String),
    Other(Opaque),
}

impl Event {
    pub fn start(name: TagName, attributes: Vec<Attribute>, namespace: Namespaces) -> Self {
        Event::StartElement(StartElement {
            name,
            attributes,
            namespace,
        })
    }

    pub fn end(name: TagName) -> Self {
        Event::EndElement(EndElement { name })
    }

    pub fn characters(text: impl Into<String>) -> Self {
        Event::Characters(text.into())
    }

    pub fn other(kind: EventKind, raw: impl Into<String>) -> Self {
        Event::Other(Opaque {
            kind,
            raw: raw.into(),
        })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::StartElement(_) => EventKind::StartElement,
            Event::EndElement(_) => EventKind::EndElement,
            Event::Characters(_) => EventKind::Characters,
            Event::Other(opaque) => opaque.kind,
        }
    }

    /// The element name of a start or end event.
    pub fn name(&self) -> Option<&TagName> {
        match self {
            Event::StartElement(start) => Some(&start.name),
            Event::EndElement(end) => Some(&end.name),
            _ => None,
        }
    }

    pub fn as_start(&self) -> Option<&StartElement> {
        match self {
            Event::StartElement(start) => Some(start),
            _ => None,
        }
    }
}

/// One-line outline of the event, used in logs and snapshots.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::StartElement(start) => {
                write!(f, "<{}", start.name)?;
                for attribute in &start.attributes {
                    write!(f, " {}={:?}", attribute.name, attribute.value)?;
                }
                write!(f, ">")
            }
            Event::EndElement(end) => write!(f, "</{}>", end.name),
            Event::Characters(text) => write!(f, "{:?}", text),
            Event::Other(opaque) => write!(f, "[{}] {:?}", opaque.kind, opaque.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SVG: &str = "http://www.w3.org/2000/svg";

    #[test]
    fn test_tag_name_equality_ignores_prefix() {
        let plain = TagName::new(SVG, "svg");
        let prefixed = TagName::new(SVG, "svg").with_prefix("svg");

        assert_eq!(plain, prefixed);

        let mut set = HashSet::new();
        set.insert(plain);
        assert!(set.contains(&prefixed));
    }

    #[test]
    fn test_tag_name_equality_uses_namespace() {
        assert_ne!(TagName::new(SVG, "rect"), TagName::local("rect"));
        assert_ne!(TagName::new(SVG, "rect"), TagName::new(SVG, "circle"));
    }

    #[test]
    fn test_empty_namespace_equals_none() {
        let empty = TagName::new("", "d");
        assert_eq!(empty, TagName::local("d"));
        assert_eq!(empty.namespace_uri(), "");
    }

    #[test]
    fn test_tag_name_display() {
        assert_eq!(TagName::new(SVG, "style").with_prefix("svg").to_string(), "svg:style");
        assert_eq!(TagName::new(SVG, "rect").to_string(), "rect");
    }

    #[test]
    fn test_declared_since_keeps_new_and_rebound_prefixes() {
        let parent = Namespaces::new().with("", SVG).with("inkscape", "urn:inkscape");
        let child = parent
            .clone()
            .with("inkscape", "urn:other")
            .with("xlink", "http://www.w3.org/1999/xlink");

        let declared = child.declared_since(&parent);

        assert_eq!(
            declared,
            Namespaces::new()
                .with("inkscape", "urn:other")
                .with("xlink", "http://www.w3.org/1999/xlink")
        );
        assert!(parent.declared_since(&parent).is_empty());
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(Event::end(TagName::local("a")).kind(), EventKind::EndElement);
        assert_eq!(Event::characters("x").kind(), EventKind::Characters);
        assert_eq!(Event::other(EventKind::CData, "x").kind(), EventKind::CData);
    }

    #[test]
    fn test_start_element_attribute_lookup() {
        let event = Event::start(
            TagName::new(SVG, "rect"),
            vec![Attribute::local("width", "10"), Attribute::local("height", "20")],
            Namespaces::new(),
        );
        let start = event.as_start().unwrap();

        assert_eq!(start.attribute(&TagName::local("height")), Some("20"));
        assert_eq!(start.attribute(&TagName::local("fill")), None);
    }

    #[test]
    fn test_event_outline() {
        let start = Event::start(
            TagName::new(SVG, "svg").with_prefix("svg"),
            vec![Attribute::local("id", "a"), Attribute::local("class", "i")],
            Namespaces::new(),
        );

        assert_eq!(start.to_string(), r#"<svg:svg id="a" class="i">"#);
        assert_eq!(Event::end(TagName::new(SVG, "rect")).to_string(), "</rect>");
        assert_eq!(Event::characters("hi").to_string(), r#""hi""#);
    }
}
