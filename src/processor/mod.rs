//! Event processors.
//!
//! A processor decides whether it owns an event (`accepts`) and what the
//! event becomes in the stacked output (`process`). The default set
//! partitions the event space: every start or end element is owned by at
//! most one element processor, and events nobody accepts are dropped.
//!
//! # Example
//!
//! ```ignore
//! use stockpile::processor::ProcessorSet;
//!
//! let processors = ProcessorSet::default();
//! let mut output = Vec::new();
//! processors.apply(&id, &event, &mut output)?;
//! ```

mod end_element;
mod filter;
mod start_element;
mod svg_tag;

use std::fmt;

use crate::error::Result;
use crate::id::DocumentId;
use crate::stream::Event;

/// One of the stacking processors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Processor {
    /// Passes through event kinds no other processor owns (CDATA etc.).
    Filter,
    /// Rewrites the document's `<svg>` into the fragment wrapper.
    SvgTag,
    /// Strips foreign attributes from ordinary start elements.
    StartElement,
    /// Passes through ordinary end elements.
    EndElement,
}

impl Processor {
    /// Registration order of the default set.
    pub const ALL: [Processor; 4] = [
        Processor::Filter,
        Processor::SvgTag,
        Processor::StartElement,
        Processor::EndElement,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Processor::Filter => "filter",
            Processor::SvgTag => "svg-tag",
            Processor::StartElement => "start-element",
            Processor::EndElement => "end-element",
        }
    }

    pub fn accepts(self, event: &Event) -> bool {
        match self {
            Processor::Filter => filter::accepts(event),
            Processor::SvgTag => svg_tag::accepts(event),
            Processor::StartElement => start_element::accepts(event),
            Processor::EndElement => end_element::accepts(event),
        }
    }

    /// Process an event this processor accepts.
    ///
    /// Calling this with an event the processor does not accept is a
    /// programming error and may return `ProcessorContract`.
    pub fn process(self, id: &DocumentId, event: &Event) -> Result<Vec<Event>> {
        match self {
            Processor::Filter => Ok(filter::process(event)),
            Processor::SvgTag => svg_tag::process(id, event),
            Processor::StartElement => start_element::process(event),
            Processor::EndElement => Ok(end_element::process(event)),
        }
    }
}

impl fmt::Display for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered set of processors.
///
/// Registering the same processor twice has no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorSet {
    processors: Vec<Processor>,
}

impl ProcessorSet {
    pub fn new(processors: impl IntoIterator<Item = Processor>) -> Self {
        let mut set = Vec::new();
        for processor in processors {
            if !set.contains(&processor) {
                set.push(processor);
            }
        }
        Self { processors: set }
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    /// Processors accepting `event`, in registration order.
    pub fn accepting<'a>(&'a self, event: &'a Event) -> impl Iterator<Item = Processor> + 'a {
        self.processors.iter().copied().filter(move |p| p.accepts(event))
    }

    /// Append the output of every accepting processor to `output`.
    pub fn apply(&self, id: &DocumentId, event: &Event, output: &mut Vec<Event>) -> Result<()> {
        for processor in self.accepting(event) {
            output.extend(processor.process(id, event)?);
        }
        Ok(())
    }
}

/// Filter, svg-tag, start-element, end-element.
impl Default for ProcessorSet {
    fn default() -> Self {
        Self::new(Processor::ALL)
    }
}
