//! Synthetic events wrapping the stacked document and its fragments.

use crate::id::DocumentId;
use crate::stream::{Attribute, Event, Namespaces};

use super::tags::{embedded_svg_tag, style_tag, svg_tag};
use super::view_box::ViewBox;
use super::{NAMESPACE_PREFIX, NAMESPACE_URI};

/// CSS class that hides a fragment until it is targeted.
pub const HIDDEN_CLASS: &str = "i";

/// Hides every fragment except the one named by the URL fragment.
pub const HIDE_EMBEDDED_STYLE: &str = ".i {display:none;}.i:target {display:block;}";

/// Outer `<svg>` start, declaring the default and `svg:` namespaces.
pub fn svg_start(view_box: &ViewBox) -> Event {
    Event::start(
        svg_tag(),
        vec![
            Attribute::local("width", view_box.width.to_string()),
            Attribute::local("height", view_box.height.to_string()),
            Attribute::local("viewBox", view_box.format()),
        ],
        Namespaces::new()
            .with("", NAMESPACE_URI)
            .with(NAMESPACE_PREFIX, NAMESPACE_URI),
    )
}

pub fn svg_end() -> Event {
    Event::end(svg_tag())
}

/// `<svg:style>` block that hides every fragment until targeted.
pub fn hide_embedded_svgs() -> [Event; 3] {
    [
        Event::start(style_tag(), vec![], Namespaces::new()),
        Event::characters(HIDE_EMBEDDED_STYLE),
        Event::end(style_tag()),
    ]
}

/// Start of the `<svg:svg id=".." class="i">` wrapper for one fragment.
pub fn embedded_svg_start(id: &DocumentId) -> Event {
    Event::start(
        embedded_svg_tag(),
        vec![
            Attribute::local("id", id.as_str()),
            Attribute::local("class", HIDDEN_CLASS),
        ],
        Namespaces::new(),
    )
}

pub fn embedded_svg_end() -> Event {
    Event::end(embedded_svg_tag())
}
