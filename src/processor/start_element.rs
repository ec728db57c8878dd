//! Strips foreign-namespace attributes from ordinary start elements.

use crate::error::{Result, StockpileError};
use crate::stream::{Event, StartElement};
use crate::svg::tags::{is_group_tag, is_svg_tag};
use crate::svg::{is_optimizable, NAMESPACE_URI};

/// Start tags of SVG elements other than `svg` and `g`.
pub fn accepts(event: &Event) -> bool {
    match event {
        Event::StartElement(start) => {
            is_optimizable(&start.name) && !is_svg_tag(&start.name) && !is_group_tag(&start.name)
        }
        _ => false,
    }
}

/// The start tag with foreign-namespace attributes removed.
pub fn process(event: &Event) -> Result<Vec<Event>> {
    match event {
        Event::StartElement(start) => Ok(vec![remove_non_svg_attributes(start)]),
        other => Err(StockpileError::ProcessorContract {
            processor: "start-element",
            kind: other.kind(),
        }),
    }
}

/// Keep unprefixed and SVG-namespace attributes, in their original order.
fn remove_non_svg_attributes(start: &StartElement) -> Event {
    let attributes = start
        .attributes
        .iter()
        .filter(|a| {
            let uri = a.name.namespace_uri();
            uri.is_empty() || uri == NAMESPACE_URI
        })
        .cloned()
        .collect();

    Event::start(start.name.clone(), attributes, start.namespace.clone())
}
