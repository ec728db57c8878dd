//! Init command implementation.
//!
//! Generates a `stockpile.yaml` listing the directories that hold SVG files.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover, MANIFEST_FILENAME};
use crate::error::{Result, StockpileError};
use crate::output::{display_path, plural, Printer};
use crate::svg::ViewBox;

use super::build::parse_view_box;

/// Initialize a stockpile project by generating a stockpile.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// View box to record in the manifest
    #[arg(long, default_value = "0 0 500 500", value_parser = parse_view_box, allow_hyphen_values = true)]
    pub view_box: ViewBox,

    /// Overwrite an existing stockpile.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(StockpileError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let discovery = discover(&args.path)?;

    let source_dirs = source_dirs(&discovery.root, &discovery.scan.files);
    let yaml = manifest_yaml(&source_dirs, args.view_box);

    fs::write(&manifest_path, &yaml).map_err(|e| StockpileError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if !source_dirs.is_empty() {
        let dirs: Vec<&str> = source_dirs.iter().map(|s| s.as_str()).collect();
        printer.info("Discovered", &dirs.join(", "));
    }

    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(discovery.scan.total(), "SVG file", "SVG files")
        ),
    );

    Ok(())
}

/// Parent directories of `files`, relative to `root`, as `"dir/"` or `"."`.
fn source_dirs(root: &Path, files: &[PathBuf]) -> BTreeSet<String> {
    files
        .iter()
        .filter_map(|file| file.parent())
        .map(|parent| {
            let relative = parent.strip_prefix(root).unwrap_or(parent);
            if relative.as_os_str().is_empty() {
                ".".to_string()
            } else {
                format!("{}/", relative.display())
            }
        })
        .collect()
}

/// Manifest text, with the optional `index` key commented out.
fn manifest_yaml(source_dirs: &BTreeSet<String>, view_box: ViewBox) -> String {
    let mut yaml = String::new();

    // A lone "." is the default and needs no sources list.
    if !(source_dirs.is_empty() || (source_dirs.len() == 1 && source_dirs.contains("."))) {
        yaml.push_str("sources:\n");
        for dir in source_dirs {
            yaml.push_str(&format!("  - \"{}\"\n", dir));
        }
    }

    yaml.push_str("output: dist/sprites.svg\n");
    yaml.push_str(&format!("view_box: \"{}\"\n", view_box));
    yaml.push_str("# index: dist/sprites.json\n");
    yaml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::Manifest;
    use tempfile::tempdir;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;

    fn init_args(path: &Path, force: bool) -> InitArgs {
        InitArgs {
            path: path.to_path_buf(),
            view_box: ViewBox::default(),
            force,
        }
    }

    #[test]
    fn test_init_creates_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("close.svg"), SVG).unwrap();

        run(init_args(dir.path(), false), &Printer::with_color(false)).unwrap();

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert!(content.contains("output: dist/sprites.svg"));
        assert!(!content.contains("sources:"));
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "output: out.svg").unwrap();

        let result = run(init_args(dir.path(), false), &Printer::with_color(false));
        assert!(result.is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "output: out.svg").unwrap();

        run(init_args(dir.path(), true), &Printer::with_color(false)).unwrap();

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert!(content.contains("output: dist/sprites.svg"));
    }

    #[test]
    fn test_init_discovers_source_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons/nav")).unwrap();
        fs::create_dir_all(dir.path().join("logos")).unwrap();
        fs::write(dir.path().join("icons/nav/back.svg"), SVG).unwrap();
        fs::write(dir.path().join("logos/brand.svg"), SVG).unwrap();

        run(init_args(dir.path(), false), &Printer::with_color(false)).unwrap();

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert!(content.contains("sources:"));
        assert!(content.contains("icons/nav/"));
        assert!(content.contains("logos/"));
    }

    #[test]
    fn test_generated_manifest_parses() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/close.svg"), SVG).unwrap();

        let args = InitArgs {
            view_box: ViewBox::new(0, 0, 24, 24),
            ..init_args(dir.path(), false)
        };
        run(args, &Printer::with_color(false)).unwrap();

        let manifest = Manifest::load(&dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(manifest.sources, vec!["icons/"]);
        assert_eq!(manifest.view_box, ViewBox::new(0, 0, 24, 24));
        assert_eq!(manifest.index, None);
    }
}
