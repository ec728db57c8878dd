//! Watch command implementation.
//!
//! Builds once, then rebuilds whenever an SVG input or the manifest changes.
//! Bursts of file events are coalesced into a single rebuild.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use log::{debug, warn};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::discovery::{has_svg_extension, MANIFEST_FILENAME};
use crate::error::{Result, StockpileError};
use crate::output::{display_path, Printer};

use super::build::{self, BuildArgs};

/// Rebuild whenever an input changes
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Milliseconds to wait for further changes before rebuilding
    #[arg(long, default_value_t = 300)]
    pub debounce: u64,
}

pub fn run(args: WatchArgs, printer: &Printer) -> Result<()> {
    let debounce = Duration::from_millis(args.debounce);
    let mut output = rebuild(&args.build, printer);

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(watch_error)?;
    for (path, mode) in watch_targets(&args.build.paths) {
        let canonical = path.canonicalize().unwrap_or(path);
        debug!("Watching {} ({:?})", canonical.display(), mode);
        watcher.watch(&canonical, mode).map_err(watch_error)?;
        printer.info("Watching", &display_path(&canonical));
    }

    loop {
        let event = match rx.recv() {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => {
                warn!("Watch error: {}", e);
                continue;
            }
            Err(_) => break,
        };

        if !is_relevant(&event, output.as_deref()) {
            continue;
        }

        // Drain the burst that usually follows a save.
        while let Ok(Ok(_)) = rx.recv_timeout(debounce) {}

        if let Some(path) = event.paths.first() {
            printer.info("Changed", &display_path(path));
        }
        output = rebuild(&args.build, printer).or(output);
    }

    Ok(())
}

/// Build once, reporting failures instead of returning them.
///
/// Returns the canonical output path on success.
fn rebuild(args: &BuildArgs, printer: &Printer) -> Option<PathBuf> {
    let result = args
        .plan()
        .and_then(|plan| build::execute(&plan, printer).map(|_| plan.output));

    match result {
        Ok(output) => Some(output.canonicalize().unwrap_or(output)),
        Err(e) => {
            printer.error("Error", &e.to_string());
            None
        }
    }
}

/// Paths to watch: directories recursively, files through their parent.
fn watch_targets(paths: &[PathBuf]) -> Vec<(PathBuf, RecursiveMode)> {
    if paths.is_empty() {
        return vec![(PathBuf::from("."), RecursiveMode::Recursive)];
    }

    let mut targets: Vec<(PathBuf, RecursiveMode)> = Vec::new();
    for path in paths {
        let target = if path.is_dir() {
            (path.clone(), RecursiveMode::Recursive)
        } else {
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            (parent, RecursiveMode::NonRecursive)
        };

        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    targets
}

/// Whether an event should trigger a rebuild.
///
/// Only content changes to SVG files or the manifest count. Writes to the
/// stacked output itself are ignored.
pub fn is_relevant(event: &Event, output: Option<&Path>) -> bool {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return false;
    }

    event.paths.iter().any(|path| {
        if output == Some(path.as_path()) {
            return false;
        }
        has_svg_extension(path)
            || path.file_name().map(|n| n == MANIFEST_FILENAME).unwrap_or(false)
    })
}

fn watch_error(e: notify::Error) -> StockpileError {
    StockpileError::Build {
        message: format!("Failed to watch for changes: {}", e),
        help: None,
    }
}
