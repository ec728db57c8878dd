//! Validate command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, StockpileError};
use crate::output::{plural, Printer};
use crate::validation::{print_diagnostics, validate_paths};

use super::build::BuildArgs;

/// Check input files without writing output
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Files or directories to check (default: project in current directory)
    pub paths: Vec<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let plan = BuildArgs {
        paths: args.paths,
        output: None,
        view_box: None,
        index: None,
    }
    .plan()?;

    printer.status("Checking", &plural(plan.files.len(), "file", "files"));
    let result = validate_paths(&plan.files);
    print_diagnostics(&result, printer);

    if result.has_errors() {
        return Err(StockpileError::Build {
            message: format!("Validation failed with {}", plural(result.error_count(), "error", "errors")),
            help: None,
        });
    }

    Ok(())
}
