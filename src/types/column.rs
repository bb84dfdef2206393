//! Column descriptors and their width policies.

use serde::{Deserialize, Serialize};

/// How a column's width is decided.
///
/// JSON form: `"grow"`, `"shrink"` or `{"fixed": 120}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthPolicy {
    /// Explicit width in pixels
    Fixed(f32),
    /// Takes whatever space is left (no explicit width)
    #[default]
    Grow,
    /// Sized to the widest natural content across all sections
    Shrink,
}

/// A single column descriptor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColSpec {
    #[serde(default)]
    pub width: WidthPolicy,
    /// Minimum width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f32>,
}

impl ColSpec {
    /// Column with a fixed pixel width
    pub fn fixed(width: f32) -> Self {
        Self {
            width: WidthPolicy::Fixed(width),
            min_width: None,
        }
    }

    /// Flexible column
    pub fn grow() -> Self {
        Self {
            width: WidthPolicy::Grow,
            min_width: None,
        }
    }

    /// Auto-sized column shared across sections
    pub fn shrink() -> Self {
        Self {
            width: WidthPolicy::Shrink,
            min_width: None,
        }
    }

    #[must_use]
    pub fn with_min_width(mut self, min_width: f32) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn is_shrink(&self) -> bool {
        matches!(self.width, WidthPolicy::Shrink)
    }
}
