//! SVG vocabulary used by the stacking pipeline.
//!
//! See <https://www.w3.org/TR/SVG/> for the document format.

pub mod document;
pub mod tags;
mod view_box;

pub use tags::{in_svg_namespace, is_optimizable};
pub use view_box::ViewBox;

/// Prefix bound to the SVG namespace on the stacked document.
pub const NAMESPACE_PREFIX: &str = "svg";

pub const NAMESPACE_URI: &str = "http://www.w3.org/2000/svg";
