//! Serializer adapter over the `xml-rs` event writer.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Write;

use xml::attribute::Attribute as XmlAttribute;
use xml::name::Name;
use xml::namespace::Namespace;
use xml::writer::{EmitterConfig, EventWriter, XmlEvent};

use super::event::{Event, EventKind, StartElement, TagName};

/// Emitter settings for stacked output: compact, with an XML declaration.
pub fn emitter_config() -> EmitterConfig {
    EmitterConfig::new()
        .perform_indent(false)
        .write_document_declaration(true)
        .normalize_empty_elements(true)
}

/// Writes [`Event`]s to a byte sink.
pub struct EventSink<W: Write> {
    writer: EventWriter<W>,
}

impl<W: Write> EventSink<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: emitter_config().create_writer(sink),
        }
    }

    /// Write one event.
    ///
    /// Document boundaries and DTDs are not re-emitted; the writer produces
    /// its own declaration before the first element.
    pub fn write(&mut self, event: &Event) -> xml::writer::Result<()> {
        match event {
            Event::StartElement(start) => {
                let attributes: Vec<XmlAttribute<'_>> = start
                    .attributes
                    .iter()
                    .map(|a| XmlAttribute::new(name(&a.name), &a.value))
                    .collect();
                self.writer.write(XmlEvent::StartElement {
                    name: name(&start.name),
                    attributes: Cow::Owned(attributes),
                    namespace: Cow::Owned(declarations(start)),
                })
            }
            Event::EndElement(end) => self.writer.write(XmlEvent::EndElement {
                name: Some(name(&end.name)),
            }),
            Event::Characters(text) => self.writer.write(XmlEvent::Characters(text)),
            Event::Other(opaque) => match opaque.kind {
                EventKind::CData => self.writer.write(XmlEvent::CData(&opaque.raw)),
                EventKind::Comment => self.writer.write(XmlEvent::Comment(&opaque.raw)),
                EventKind::ProcessingInstruction => {
                    let (target, data) = match opaque.raw.split_once(' ') {
                        Some((target, data)) => (target, Some(data)),
                        None => (opaque.raw.as_str(), None),
                    };
                    self.writer.write(XmlEvent::ProcessingInstruction { name: target, data })
                }
                EventKind::Whitespace | EventKind::EntityReference => {
                    self.writer.write(XmlEvent::Characters(&opaque.raw))
                }
                _ => Ok(()),
            },
        }
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// The element's declarations plus a binding for every prefix its name and
/// attributes use. Bindings already in scope are skipped by the emitter.
fn declarations(start: &StartElement) -> Namespace {
    let mut bindings: BTreeMap<String, String> = start.namespace.clone().into();
    let used = std::iter::once(&start.name).chain(start.attributes.iter().map(|a| &a.name));
    for name in used {
        if let (Some(prefix), Some(uri)) = (&name.prefix, &name.namespace) {
            if !prefix.is_empty() {
                bindings.entry(prefix.clone()).or_insert_with(|| uri.clone());
            }
        }
    }
    Namespace(bindings)
}

fn name(name: &TagName) -> Name<'_> {
    Name {
        local_name: &name.local_name,
        namespace: name.namespace.as_deref(),
        prefix: name.prefix.as_deref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{Attribute, Namespaces};

    const SVG: &str = "http://www.w3.org/2000/svg";

    fn serialize(events: &[Event]) -> String {
        let mut sink = EventSink::new(Vec::new());
        for event in events {
            sink.write(event).unwrap();
        }
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_writes_prefixed_names_and_namespaces() {
        let output = serialize(&[
            Event::start(
                TagName::new(SVG, "svg"),
                vec![Attribute::local("width", "10")],
                Namespaces::new().with("", SVG).with("svg", SVG),
            ),
            Event::start(
                TagName::new(SVG, "svg").with_prefix("svg"),
                vec![Attribute::local("id", "a")],
                Namespaces::new(),
            ),
            Event::end(TagName::new(SVG, "svg").with_prefix("svg")),
            Event::end(TagName::new(SVG, "svg")),
        ]);

        assert!(output.starts_with("<?xml"));
        assert!(output.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(output.contains(r#"xmlns:svg="http://www.w3.org/2000/svg""#));
        assert!(output.contains(r#"<svg:svg id="a""#));
        assert!(output.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_declares_only_what_is_not_in_scope() {
        let output = serialize(&[
            Event::start(
                TagName::new(SVG, "svg"),
                vec![],
                Namespaces::new().with("", SVG).with("svg", SVG),
            ),
            Event::start(TagName::new(SVG, "svg").with_prefix("svg"), vec![], Namespaces::new()),
            Event::start(TagName::new(SVG, "path"), vec![], Namespaces::new()),
            Event::end(TagName::new(SVG, "path")),
            Event::end(TagName::new(SVG, "svg").with_prefix("svg")),
            Event::end(TagName::new(SVG, "svg")),
        ]);

        assert_eq!(output.matches("xmlns").count(), 2);
        assert!(output.contains("<path />") || output.contains("<path/>"));
    }

    #[test]
    fn test_binds_prefixes_used_without_declaration() {
        let output = serialize(&[
            Event::start(TagName::new(SVG, "svg"), vec![], Namespaces::new().with("", SVG)),
            Event::start(
                TagName::new(SVG, "rect").with_prefix("s"),
                vec![Attribute::new(
                    TagName::new("http://www.w3.org/1999/xlink", "href").with_prefix("xlink"),
                    "#a",
                )],
                Namespaces::new(),
            ),
            Event::end(TagName::new(SVG, "rect").with_prefix("s")),
            Event::end(TagName::new(SVG, "svg")),
        ]);

        assert!(output.contains(r#"xmlns:s="http://www.w3.org/2000/svg""#));
        assert!(output.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
    }

    #[test]
    fn test_skips_document_boundaries() {
        let output = serialize(&[
            Event::other(EventKind::StartDocument, "UTF-8"),
            Event::start(TagName::local("a"), vec![], Namespaces::new()),
            Event::other(EventKind::CData, "x < y"),
            Event::end(TagName::local("a")),
            Event::other(EventKind::EndDocument, ""),
        ]);

        assert_eq!(output.matches("<?xml").count(), 1);
        assert!(output.contains("<![CDATA[x < y]]>"));
    }

    #[test]
    fn test_escapes_text() {
        let output = serialize(&[
            Event::start(TagName::local("a"), vec![], Namespaces::new()),
            Event::characters("1 < 2"),
            Event::end(TagName::local("a")),
        ]);

        assert!(output.contains("1 &lt; 2"));
    }
}
