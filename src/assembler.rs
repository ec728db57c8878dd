//! Drives one input document through a processor set.

use std::io::Read;

use log::debug;

use crate::error::{Result, StockpileError};
use crate::id::DocumentId;
use crate::processor::ProcessorSet;
use crate::stream::{Event, EventStream};

/// Assembles the processed event sequence for a single document.
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    processors: ProcessorSet,
}

impl DocumentAssembler {
    pub fn new(processors: ProcessorSet) -> Self {
        Self { processors }
    }

    pub fn processors(&self) -> &ProcessorSet {
        &self.processors
    }

    /// Read `source` to the end and return the processed events.
    ///
    /// Malformed XML aborts the document; no partial output is returned.
    pub fn assemble<R: Read>(&self, id: &DocumentId, source: R) -> Result<Vec<Event>> {
        let mut output = Vec::new();
        let mut read = 0usize;

        for event in EventStream::new(source) {
            let event = event.map_err(|e| StockpileError::MalformedXml {
                id: id.to_string(),
                message: e.to_string(),
            })?;
            read += 1;
            self.processors.apply(id, &event, &mut output)?;
        }

        debug!("#{}: kept {} of {} events", id, output.len(), read);
        Ok(output)
    }

    /// Process an already tokenized event sequence.
    pub fn assemble_events(
        &self,
        id: &DocumentId,
        events: impl IntoIterator<Item = Event>,
    ) -> Result<Vec<Event>> {
        let mut output = Vec::new();
        for event in events {
            self.processors.apply(id, &event, &mut output)?;
        }
        Ok(output)
    }
}
