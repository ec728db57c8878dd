//! Pass-through for event kinds no other processor owns.

use crate::stream::{Event, EventKind};

/// Kinds owned by the element processors or dropped by omission.
const REJECTED: [EventKind; 9] = [
    EventKind::StartElement,
    EventKind::EndElement,
    EventKind::ProcessingInstruction,
    EventKind::Characters,
    EventKind::Comment,
    EventKind::Whitespace,
    EventKind::StartDocument,
    EventKind::EndDocument,
    EventKind::Dtd,
];

/// Events of a kind no element processor owns and that are not dropped.
pub fn accepts(event: &Event) -> bool {
    !REJECTED.contains(&event.kind())
}

/// The event, unchanged.
pub fn process(event: &Event) -> Vec<Event> {
    vec![event.clone()]
}
