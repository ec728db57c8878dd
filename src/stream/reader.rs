//! Tokenizer adapter over the `xml-rs` pull parser.

use std::io::Read;

use xml::attribute::OwnedAttribute;
use xml::name::OwnedName;
use xml::namespace::NamespaceStack;
use xml::reader::{Events, ParserConfig, XmlEvent};

use super::event::{Attribute, Event, EventKind, Namespaces, TagName};

/// Parser settings used for every input document.
///
/// Comments, whitespace and CDATA are reported as their own events so the
/// processors can decide what survives.
pub fn parser_config() -> ParserConfig {
    ParserConfig::new()
        .trim_whitespace(false)
        .whitespace_to_characters(false)
        .cdata_to_characters(false)
        .ignore_comments(false)
        .coalesce_characters(true)
}

/// A stream of [`Event`]s read from one XML document.
///
/// Start elements carry only the namespace bindings declared on them. The
/// stream ends after the end-document event or after the first error.
pub struct EventStream<R: Read> {
    events: Events<R>,
    /// Bindings in scope for each open element, innermost last.
    scopes: Vec<Namespaces>,
}

impl<R: Read> EventStream<R> {
    pub fn new(source: R) -> Self {
        Self {
            events: parser_config().create_reader(source).into_iter(),
            scopes: vec![Namespaces::from(NamespaceStack::default().squash().0)],
        }
    }

    fn convert(&mut self, event: XmlEvent) -> Event {
        match event {
            XmlEvent::StartElement {
                name,
                attributes,
                namespace,
            } => {
                let scope = Namespaces::from(namespace.0);
                let declared = match self.scopes.last() {
                    Some(parent) => scope.declared_since(parent),
                    None => scope.clone(),
                };
                self.scopes.push(scope);
                Event::start(
                    name.into(),
                    attributes.into_iter().map(Attribute::from).collect(),
                    declared,
                )
            }
            XmlEvent::EndElement { name } => {
                self.scopes.pop();
                Event::end(name.into())
            }
            other => Event::from(other),
        }
    }
}

impl<R: Read> Iterator for EventStream<R> {
    type Item = Result<Event, xml::reader::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.events.next()?;
        Some(result.map(|event| self.convert(event)))
    }
}

impl From<OwnedName> for TagName {
    fn from(name: OwnedName) -> Self {
        Self {
            local_name: name.local_name,
            namespace: name.namespace,
            prefix: name.prefix,
        }
    }
}

impl From<OwnedAttribute> for Attribute {
    fn from(attribute: OwnedAttribute) -> Self {
        Self::new(attribute.name.into(), attribute.value)
    }
}

/// Start elements converted this way carry every binding in scope.
impl From<XmlEvent> for Event {
    fn from(event: XmlEvent) -> Self {
        match event {
            XmlEvent::StartDocument { encoding, .. } => {
                Event::other(EventKind::StartDocument, encoding)
            }
            XmlEvent::EndDocument => Event::other(EventKind::EndDocument, ""),
            XmlEvent::ProcessingInstruction { name, data } => {
                let raw = match data {
                    Some(data) => format!("{} {}", name, data),
                    None => name,
                };
                Event::other(EventKind::ProcessingInstruction, raw)
            }
            XmlEvent::StartElement {
                name,
                attributes,
                namespace,
            } => Event::start(
                name.into(),
                attributes.into_iter().map(Attribute::from).collect(),
                Namespaces::from(namespace.0),
            ),
            XmlEvent::EndElement { name } => Event::end(name.into()),
            XmlEvent::CData(text) => Event::other(EventKind::CData, text),
            XmlEvent::Comment(text) => Event::other(EventKind::Comment, text),
            XmlEvent::Characters(text) => Event::Characters(text),
            XmlEvent::Whitespace(text) => Event::other(EventKind::Whitespace, text),
        }
    }
}
