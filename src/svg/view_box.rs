//! View box of the stacked document.
//!
//! # Example
//!
//! ```ignore
//! let view_box: ViewBox = "0 0 500 500".parse()?;
//! assert_eq!(view_box.to_string(), "0 0 500 500");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StockpileError};

/// The coordinate system and size of the outer `<svg>` element.
///
/// Values are used verbatim; zero or negative sizes are passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ViewBox {
    pub min_x: i32,
    pub min_y: i32,
    pub width: i32,
    pub height: i32,
}

impl ViewBox {
    pub fn new(min_x: i32, min_y: i32, width: i32, height: i32) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Format as a `viewBox` attribute value: `"minX minY width height"`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Parse `"minX minY width height"`. Commas are accepted as separators.
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() != 4 {
            return Err(StockpileError::Parse {
                message: format!("Invalid view box: '{}' (expected 4 integers)", s.trim()),
                help: Some("Use the form \"minX minY width height\", e.g. \"0 0 500 500\"".to_string()),
            });
        }

        let mut values = [0i32; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.parse().map_err(|_| StockpileError::Parse {
                message: format!("Invalid view box value: '{}'", part),
                help: None,
            })?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

/// 0 0 500 500
impl Default for ViewBox {
    fn default() -> Self {
        Self::new(0, 0, 500, 500)
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

impl FromStr for ViewBox {
    type Err = StockpileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ViewBox {
    type Error = StockpileError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ViewBox> for String {
    fn from(view_box: ViewBox) -> Self {
        view_box.format()
    }
}
