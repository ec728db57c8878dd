//! SVG tag names and classification.

use crate::stream::TagName;

use super::{NAMESPACE_PREFIX, NAMESPACE_URI};

pub const SVG: &str = "svg";
pub const GROUP: &str = "g";
pub const METADATA: &str = "metadata";
pub const DEFS: &str = "defs";
pub const STYLE: &str = "style";

/// Tags dropped from stacked output, along with their start/end events.
pub const UNOPTIMIZED: [&str; 3] = [METADATA, DEFS, GROUP];

/// The `<svg>` tag.
pub fn svg_tag() -> TagName {
    TagName::new(NAMESPACE_URI, SVG)
}

/// The `<svg:svg>` tag wrapping each embedded document.
pub fn embedded_svg_tag() -> TagName {
    svg_tag().with_prefix(NAMESPACE_PREFIX)
}

/// The `<svg:style>` tag.
pub fn style_tag() -> TagName {
    TagName::new(NAMESPACE_URI, STYLE).with_prefix(NAMESPACE_PREFIX)
}

pub fn in_svg_namespace(name: &TagName) -> bool {
    name.namespace_uri() == NAMESPACE_URI
}

/// Whether a tag may appear in stacked output.
pub fn is_optimizable(name: &TagName) -> bool {
    in_svg_namespace(name) && !UNOPTIMIZED.contains(&name.local_name.as_str())
}

pub fn is_svg_tag(name: &TagName) -> bool {
    in_svg_namespace(name) && name.local_name == SVG
}

pub fn is_group_tag(name: &TagName) -> bool {
    in_svg_namespace(name) && name.local_name == GROUP
}
