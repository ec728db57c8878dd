//! Rewrites a document's own `<svg>` element into a fragment wrapper.
//!
//! The start tag becomes `<svg:svg id="{id}" class="i">`; every attribute
//! and namespace declaration on the original tag is discarded.

use crate::error::{Result, StockpileError};
use crate::id::DocumentId;
use crate::stream::Event;
use crate::svg::document::{embedded_svg_end, embedded_svg_start};
use crate::svg::is_optimizable;
use crate::svg::tags::is_svg_tag;

/// Start and end tags of SVG-namespace `<svg>` elements.
pub fn accepts(event: &Event) -> bool {
    match event {
        Event::StartElement(_) | Event::EndElement(_) => event
            .name()
            .is_some_and(|name| is_optimizable(name) && is_svg_tag(name)),
        _ => false,
    }
}

/// Replace the tag with the fragment wrapper for `id`.
pub fn process(id: &DocumentId, event: &Event) -> Result<Vec<Event>> {
    match event {
        Event::StartElement(_) => Ok(vec![embedded_svg_start(id)]),
        Event::EndElement(_) => Ok(vec![embedded_svg_end()]),
        other => Err(StockpileError::ProcessorContract {
            processor: "svg-tag",
            kind: other.kind(),
        }),
    }
}
