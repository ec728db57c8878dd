//! Build command implementation.
//!
//! Stacks the discovered SVG files into one document and optionally writes
//! a JSON index of its fragments.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover, discover_paths, DiscoveryResult};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::stack::{Stack, StackBuilder};
use crate::svg::ViewBox;
use crate::validation::{print_diagnostics, validate_stack};

/// Stack SVG files into one document
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Files or directories to stack (default: project in current directory)
    pub paths: Vec<PathBuf>,

    /// Stacked SVG to write
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// View box of the stacked document, e.g. "0 0 24 24"
    #[arg(long, value_parser = parse_view_box, allow_hyphen_values = true)]
    pub view_box: Option<ViewBox>,

    /// Also write a JSON index of the fragments
    #[arg(long)]
    pub index: Option<PathBuf>,
}

pub(crate) fn parse_view_box(s: &str) -> std::result::Result<ViewBox, String> {
    ViewBox::parse(s).map_err(|e| e.to_string())
}

/// Inputs and outputs of one build, after manifest and flags are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildPlan {
    /// Project root, or the directory of the first explicit path.
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
    pub index: Option<PathBuf>,
    pub view_box: ViewBox,
}

impl BuildArgs {
    /// Discover inputs and merge manifest settings with command-line flags.
    ///
    /// A single directory argument is treated as a project root and may carry
    /// its own `stockpile.yaml`.
    pub fn plan(&self) -> Result<BuildPlan> {
        let discovery = self.discover()?;

        let output = self.output.clone().unwrap_or_else(|| discovery.output_path());
        let index = self.index.clone().or_else(|| discovery.index_path());
        let view_box = self.view_box.unwrap_or(discovery.manifest.view_box);
        let files = discovery
            .scan
            .files
            .into_iter()
            .filter(|f| !same_file(f, &output))
            .collect();

        Ok(BuildPlan {
            root: discovery.root,
            files,
            output,
            index,
            view_box,
        })
    }

    fn discover(&self) -> Result<DiscoveryResult> {
        match self.paths.as_slice() {
            [] => discover("."),
            [dir] if dir.is_dir() => discover(dir),
            paths => discover_paths(paths),
        }
    }
}

/// Whether both paths name the same existing file, however they are spelled.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let plan = args.plan()?;
    execute(&plan, printer)?;
    Ok(())
}

/// Stack, write and report one build.
pub fn execute(plan: &BuildPlan, printer: &Printer) -> Result<Stack> {
    if plan.files.is_empty() {
        printer.warning("Empty", &format!("no SVG files found in {}", display_path(&plan.root)));
    }

    for file in &plan.files {
        printer.status("Stacking", &display_path(file));
    }

    let stack = StackBuilder::new(plan.view_box).stack_paths(&plan.files)?;

    let diagnostics = validate_stack(&stack);
    if !diagnostics.is_ok() {
        print_diagnostics(&diagnostics, printer);
    }

    stack.write_to_path(&plan.output)?;
    printer.success(
        "Stacked",
        &format!(
            "{} into {}",
            plural(stack.fragments().len(), "fragment", "fragments"),
            printer.cyan(&display_path(&plan.output))
        ),
    );

    if let Some(index) = &plan.index {
        stack.write_index(index)?;
        printer.info("Indexed", &display_path(index));
    }

    Ok(stack)
}
