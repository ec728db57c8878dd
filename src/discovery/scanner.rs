//! File system scanner for SVG inputs.

use std::path::{Component, Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use super::manifest::Manifest;

/// SVG files found by a scan, in stacking order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Append another scan's files, skipping ones already present.
    pub fn merge(&mut self, other: ScanResult) {
        for file in other.files {
            if !self.files.contains(&file) {
                self.files.push(file);
            }
        }
    }
}

/// Whether `path` has an `.svg` extension, ignoring case.
///
/// A file named just `.svg` has no extension and is not picked up by scans.
pub fn has_svg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// Recursively collect SVG files under `root`, sorted by path.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        debug!("Skipping missing source {}", root.display());
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !entry.file_type().is_file() || !has_svg_extension(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if manifest.is_excluded(relative) || manifest.is_excluded(path) {
            debug!("Excluded {}", path.display());
            continue;
        }

        result.files.push(path.to_path_buf());
    }

    debug!("Found {} SVG file(s) in {}", result.total(), root.display());
    result
}

/// Scan manifest sources, resolving relative ones against `base_path`.
///
/// A source naming a single file is taken as-is; `"."` is `base_path` itself.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source = Path::new(source);
        let source_path = if source.is_absolute() {
            source.to_path_buf()
        } else if source.components().all(|c| c == Component::CurDir) {
            base_path.to_path_buf()
        } else {
            base_path.join(source)
        };

        if source_path.is_file() {
            result.merge(ScanResult { files: vec![source_path] });
        } else {
            result.merge(scan_directory(&source_path, manifest));
        }
    }

    result
}
