//! stockpile - SVG sprite stacking
//!
//! Combines many standalone SVG documents into one "stacked" SVG. Each input
//! becomes a hidden fragment addressable by its id (`sprites.svg#close`);
//! a small style block shows the fragment named by the URL fragment.

pub mod assembler;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod id;
pub mod output;
pub mod processor;
pub mod stack;
pub mod stream;
pub mod svg;
pub mod validation;

pub use assembler::DocumentAssembler;
pub use discovery::{discover, discover_paths, DiscoveryResult, Manifest, ScanResult};
pub use error::{Result, StockpileError};
pub use id::DocumentId;
pub use processor::{Processor, ProcessorSet};
pub use stack::{Fragment, Stack, StackBuilder};
pub use stream::{Event, EventKind, TagName};
pub use svg::ViewBox;
pub use validation::{validate_paths, validate_stack, Diagnostic, Severity, ValidationResult};
