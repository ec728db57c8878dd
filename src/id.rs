//! Fragment identifiers.
//!
//! Every embedded document is addressed by `#id`, so its id has to be a
//! valid XML name that is also a plain CSS identifier.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use xml::common;

use crate::error::{Result, StockpileError};

/// Identifier of one embedded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create an id, rejecting empty or malformed values.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.is_empty() {
            return Err(invalid(&id, "id is empty"));
        }

        let mut chars = id.chars();
        if let Some(first) = chars.next() {
            if !is_start_char(first) {
                return Err(invalid(&id, "id must start with a letter or '_'"));
            }
        }

        if let Some(c) = chars.find(|&c| !is_name_char(c)) {
            return Err(invalid(&id, &format!("'{}' is not allowed in an id", c)));
        }

        Ok(Self(id))
    }

    /// Derive an id from a file's base name, without its extension.
    ///
    /// Characters that are not allowed in an id are replaced with `-`, and
    /// names starting with a digit or `-` are prefixed with `_`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| StockpileError::InvalidIdentifier {
                id: path.display().to_string(),
                reason: "path has no file name".to_string(),
                help: None,
            })?;

        let stem = match file_name.rfind('.') {
            Some(index) => &file_name[..index],
            None => file_name.as_str(),
        };

        if stem.is_empty() {
            return Err(StockpileError::InvalidIdentifier {
                id: file_name.clone(),
                reason: "file name has no base name".to_string(),
                help: Some("Rename the file so its name does not start with '.'".to_string()),
            });
        }

        Self::new(sanitize(stem))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Replace characters that cannot appear in an id.
pub fn sanitize(name: &str) -> String {
    let mut id: String = name
        .chars()
        .map(|c| if is_name_char(c) { c } else { '-' })
        .collect();

    if !id.chars().next().is_some_and(is_start_char) {
        id.insert(0, '_');
    }

    id
}

/// XML `NameStartChar` without `:`.
fn is_start_char(c: char) -> bool {
    c != ':' && common::is_name_start_char(c)
}

/// XML `NameChar` without `:` or `.`.
fn is_name_char(c: char) -> bool {
    c != ':' && c != '.' && common::is_name_char(c)
}

fn invalid(id: &str, reason: &str) -> StockpileError {
    StockpileError::InvalidIdentifier {
        id: id.to_string(),
        reason: reason.to_string(),
        help: Some("Ids may contain letters, digits, '-' and '_'".to_string()),
    }
}
