//! XML event streams.
//!
//! Reading and writing go through `xml-rs`; everything in between works on
//! the owned [`Event`] model so the processors never depend on the
//! tokenizer's types.

mod event;
mod reader;
mod writer;

pub use event::{Attribute, EndElement, Event, EventKind, Namespaces, Opaque, StartElement, TagName};
pub use reader::{parser_config, EventStream};
pub use writer::{emitter_config, EventSink};
