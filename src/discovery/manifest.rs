//! Project manifest (`stockpile.yaml`).
//!
//! The manifest names the source directories, the stacked output file and
//! the view box shared by every fragment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StockpileError};
use crate::svg::ViewBox;

/// Project manifest loaded from `stockpile.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directories or files to stack. Defaults to the project root.
    pub sources: Vec<String>,

    /// Stacked SVG to write.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// View box of the outer `<svg>`, as `"minX minY width height"`.
    pub view_box: ViewBox,

    /// Optional JSON index of the stacked fragments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<PathBuf>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist/sprites.svg")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            output: default_output(),
            view_box: ViewBox::default(),
            index: None,
            excludes: vec![],
        }
    }
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StockpileError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| StockpileError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check stockpile.yaml syntax".to_string()),
        })
    }

    /// Whether `path` matches one of the exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Source paths, defaulting to the project root.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }

    /// Output path, resolved against `root` when relative.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.output)
    }

    /// Index path, resolved against `root` when relative.
    pub fn index_path(&self, root: &Path) -> Option<PathBuf> {
        self.index.as_deref().map(|index| resolve(root, index))
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Minimal glob matching: `*.ext`, `dir/*`, `**/dir/*`, `**/name`, or a
/// plain substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }
        return path.ends_with(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(dir) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
    }

    path.contains(pattern)
}
