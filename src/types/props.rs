//! Top-level grid configuration.

use serde::{Deserialize, Serialize};

use super::{ColSpec, SectionSpec};
use crate::error::{Result, ScrollGridError};

/// Inbound configuration for a scroll grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct GridProps<E> {
    /// Column descriptors shared by every section
    #[serde(default)]
    pub cols: Vec<ColSpec>,
    /// Sections in render order
    pub sections: Vec<SectionSpec<E>>,
    /// The grid fills its container vertically
    #[serde(default)]
    pub v_grow: bool,
    /// Non-interactive print rendering; disables shrink measurement
    #[serde(default)]
    pub print: bool,
    /// Explicit height hint, passed through to the root style only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl<E> Default for GridProps<E> {
    fn default() -> Self {
        Self {
            cols: Vec::new(),
            sections: Vec::new(),
            v_grow: false,
            print: false,
            height: None,
        }
    }
}

impl<E> GridProps<E> {
    pub fn new(cols: Vec<ColSpec>, sections: Vec<SectionSpec<E>>) -> Self {
        Self {
            cols,
            sections,
            ..Self::default()
        }
    }

    /// Parse a JSON grid configuration.
    ///
    /// # Errors
    /// Returns `Config` when the document is well-formed JSON but does not
    /// describe a valid grid, and `Json` when it is not valid JSON at all.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                ScrollGridError::Config(e.to_string())
            } else {
                ScrollGridError::Json(e)
            }
        })
    }

    /// True when at least one column uses the shrink policy
    pub fn has_shrink_width(&self) -> bool {
        crate::layout::has_shrink_width(&self.cols)
    }
}
