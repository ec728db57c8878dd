//! Input discovery for stockpile projects.
//!
//! Inputs come either from a `stockpile.yaml` manifest in the project root
//! or, without one, from every SVG file under the root.
//!
//! # Example
//!
//! ```ignore
//! use stockpile::discovery::discover;
//!
//! let result = discover("./icons")?;
//! println!("Found {} files", result.scan.total());
//!
//! let stack = result.stack()?;
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::stack::{Stack, StackBuilder};

pub use manifest::Manifest;
pub use scanner::{has_svg_extension, scan_directory, scan_sources, ScanResult};

pub const MANIFEST_FILENAME: &str = "stockpile.yaml";

/// Result of discovering inputs in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest, or the default one.
    pub manifest: Manifest,

    /// Whether a `stockpile.yaml` was found.
    pub has_manifest: bool,

    /// Files to stack, in order.
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Stacked output path from the manifest.
    pub fn output_path(&self) -> PathBuf {
        self.manifest.output_path(&self.root)
    }

    /// Fragment index path from the manifest, if configured.
    pub fn index_path(&self) -> Option<PathBuf> {
        self.manifest.index_path(&self.root)
    }

    /// Stack every discovered file with the manifest's view box.
    pub fn stack(&self) -> Result<Stack> {
        StackBuilder::new(self.manifest.view_box).stack_paths(&self.scan.files)
    }
}

/// Discover inputs in a project directory.
///
/// Uses the manifest's sources when a `stockpile.yaml` exists, otherwise
/// scans the whole directory.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let sources = manifest.effective_sources();
    let scan = scan_sources(&sources, &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}

/// Discover inputs from explicit paths, without a manifest.
///
/// Files keep the order given; directories are scanned recursively. A file
/// given explicitly is stacked even without an `.svg` extension.
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let manifest = Manifest::default();
    let mut scan = ScanResult::new();

    for path in paths {
        if path.is_dir() {
            scan.merge(scan_directory(path, &manifest));
        } else {
            scan.merge(ScanResult {
                files: vec![path.clone()],
            });
        }
    }

    let root = paths
        .first()
        .map(|p| if p.is_dir() { p.as_path() } else { p.parent().unwrap_or(Path::new(".")) })
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest: false,
        scan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::ViewBox;
    use std::fs;
    use tempfile::tempdir;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#;

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempdir().unwrap();
        let result = discover(dir.path()).unwrap();

        assert!(!result.has_manifest);
        assert!(result.scan.is_empty());
        assert_eq!(result.output_path(), dir.path().join("dist/sprites.svg"));
    }

    #[test]
    fn test_discover_without_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("close.svg"), SVG).unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(!result.has_manifest);
        assert_eq!(result.scan.total(), 1);
    }

    #[test]
    fn test_discover_with_manifest() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILENAME),
            r#"
sources:
  - icons/
output: public/sprites.svg
view_box: "0 0 24 24"
index: public/sprites.json
"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/close.svg"), SVG).unwrap();
        fs::write(dir.path().join("ignored.svg"), SVG).unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(result.has_manifest);
        assert_eq!(result.scan.total(), 1);
        assert_eq!(result.manifest.view_box, ViewBox::new(0, 0, 24, 24));
        assert_eq!(result.output_path(), dir.path().join("public/sprites.svg"));
        assert_eq!(result.index_path(), Some(dir.path().join("public/sprites.json")));
    }

    #[test]
    fn test_discover_invalid_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "sources: [").unwrap();

        assert!(discover(dir.path()).is_err());
    }

    #[test]
    fn test_discover_paths_keeps_file_order() {
        let dir = tempdir().unwrap();
        let menu = dir.path().join("menu.svg");
        let close = dir.path().join("close.svg");
        fs::write(&menu, SVG).unwrap();
        fs::write(&close, SVG).unwrap();

        let result = discover_paths(&[menu.clone(), close.clone()]).unwrap();

        assert_eq!(result.scan.files, vec![menu, close]);
        assert_eq!(result.root, dir.path());
    }

    #[test]
    fn test_discover_paths_directories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("close.svg"), SVG).unwrap();
        fs::write(dir.path().join("menu.svg"), SVG).unwrap();

        let result = discover_paths(&[dir.path().to_path_buf()]).unwrap();

        assert_eq!(result.scan.total(), 2);
        assert_eq!(result.root, dir.path());
    }

    #[test]
    fn test_discovery_stack() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.svg"), SVG).unwrap();
        fs::write(dir.path().join("a.svg"), SVG).unwrap();

        let stack = discover(dir.path()).unwrap().stack().unwrap();
        let ids: Vec<&str> = stack.fragments().iter().map(|f| f.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b"]);
    }
}
