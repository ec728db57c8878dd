//! Validation of stacking inputs.
//!
//! Stacking itself only fails on malformed XML or underivable ids. The
//! checks here also report problems that produce a valid but surprising
//! stack, such as two fragments sharing an id. Used by `stockpile validate`
//! and `stockpile build`.

mod checks;
mod warning;

use std::path::Path;

use rayon::prelude::*;

pub use checks::{check_duplicate_ids, check_empty_fragments, check_source};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::assembler::DocumentAssembler;
use crate::output::Printer;
use crate::stack::Stack;

/// Run the fragment checks against an already built stack.
pub fn validate_stack(stack: &Stack) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.merge(check_duplicate_ids(stack.fragments()));
    result.merge(check_empty_fragments(stack.fragments()));
    result
}

/// Assemble every file without writing output and collect all problems.
///
/// Unlike stacking, a bad file does not stop the remaining files from being
/// checked.
pub fn validate_paths<P: AsRef<Path> + Sync>(paths: &[P]) -> ValidationResult {
    let assembler = DocumentAssembler::default();
    let checked: Vec<_> = paths
        .par_iter()
        .map(|path| check_source(path.as_ref(), &assembler))
        .collect();

    let mut result = ValidationResult::new();
    let mut fragments = Vec::new();
    for (fragment, diagnostics) in checked {
        result.merge(diagnostics);
        fragments.extend(fragment);
    }

    result.merge(check_duplicate_ids(&fragments));
    result.merge(check_empty_fragments(&fragments));
    result
}

/// Print diagnostics and a summary line to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.is_error());
        eprintln!("{}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.error(
            "Failed",
            &format!("{} error(s), {} warning(s)", errors, warnings),
        );
    } else if warnings > 0 {
        printer.warning("Passed", &format!("{} warning(s)", warnings));
    } else {
        printer.success("Passed", "no problems found");
    }
}
