//! Layout state shared by every section of a grid.

use serde::Serialize;

/// Result of the latest sizing pass.
///
/// Both fields are always written together so no render observes a width
/// from one pass paired with a scrollbar decision from another.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LayoutState {
    /// Shared width of shrink columns in pixels (`None` until measured)
    pub shrink_width: Option<f32>,
    /// Every section reserves a vertical scrollbar gutter
    pub force_vertical_scrollbars: bool,
}

impl LayoutState {
    pub fn new(shrink_width: Option<f32>, force_vertical_scrollbars: bool) -> Self {
        Self {
            shrink_width,
            force_vertical_scrollbars,
        }
    }
}
