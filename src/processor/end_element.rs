//! Pass-through for end elements of ordinary tags.

use crate::stream::Event;
use crate::svg::is_optimizable;
use crate::svg::tags::{is_group_tag, is_svg_tag};

/// End tags of SVG elements other than `svg` and `g`.
pub fn accepts(event: &Event) -> bool {
    match event {
        Event::EndElement(end) => {
            is_optimizable(&end.name) && !is_svg_tag(&end.name) && !is_group_tag(&end.name)
        }
        _ => false,
    }
}

/// The event, unchanged.
pub fn process(event: &Event) -> Vec<Event> {
    vec![event.clone()]
}
