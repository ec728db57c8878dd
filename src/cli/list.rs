//! List command implementation.
//!
//! Prints every input file with the fragment id it will be stacked under.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::Result;
use crate::id::DocumentId;
use crate::output::{display_path, plural, Printer};

use super::build::BuildArgs;

/// List input files and their fragment ids
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Files or directories to scan (default: project in current directory)
    pub paths: Vec<PathBuf>,

    /// Print the list as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// One listed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    /// Fragment id, or `None` when none can be derived from the file name.
    pub id: Option<String>,
    pub path: PathBuf,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let entries = entries(&args.paths)?;

    if args.json {
        let json = serde_json::to_string_pretty(&entries).map_err(|e| {
            crate::error::StockpileError::Build {
                message: format!("Failed to serialize list: {}", e),
                help: None,
            }
        })?;
        println!("{}", json);
        return Ok(());
    }

    for entry in &entries {
        let path = printer.dim(&display_path(&entry.path));
        match &entry.id {
            Some(id) => printer.info(&format!("#{}", id), &path),
            None => printer.warning("(no id)", &path),
        }
    }
    printer.success("Found", &plural(entries.len(), "file", "files"));

    Ok(())
}

/// Discover inputs the same way `build` does and derive their ids.
pub fn entries(paths: &[PathBuf]) -> Result<Vec<ListEntry>> {
    let plan = BuildArgs {
        paths: paths.to_vec(),
        output: None,
        view_box: None,
        index: None,
    }
    .plan()?;

    Ok(plan
        .files
        .into_iter()
        .map(|path| ListEntry {
            id: DocumentId::from_path(&path).ok().map(|id| id.to_string()),
            path,
        })
        .collect())
}
