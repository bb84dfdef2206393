//! The micro-column-group: one width entry per column, shared by every
//! section so columns line up across independently scrolling bands.

use std::rc::Rc;

use serde::Serialize;

use crate::types::{ColSpec, WidthPolicy};

/// Width used for shrink columns before the first measurement lands.
/// Small enough not to distort the natural-width measurement.
pub const SHRINK_WIDTH_FALLBACK: f32 = 4.0;

/// Rendered width of a single column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColWidth {
    /// Explicit pixel width
    Px(f32),
    /// No explicit width; the table distributes leftover space
    Auto,
}

impl ColWidth {
    /// CSS value for the `width` property (empty for auto)
    pub fn to_css(self) -> String {
        match self {
            ColWidth::Px(px) => format!("{px}px"),
            ColWidth::Auto => String::new(),
        }
    }
}

/// One `<col>` entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColRender {
    pub width: ColWidth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f32>,
}

/// The `<colgroup>` shared by every section
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ColGroup {
    pub cols: Vec<ColRender>,
}

impl ColGroup {
    /// Build the column group for `cols` at the given shrink width.
    pub fn build(cols: &[ColSpec], shrink_width: Option<f32>) -> Self {
        let cols = cols
            .iter()
            .map(|col| ColRender {
                width: match col.width {
                    WidthPolicy::Fixed(px) => ColWidth::Px(px),
                    WidthPolicy::Grow => ColWidth::Auto,
                    WidthPolicy::Shrink => {
                        ColWidth::Px(shrink_width.unwrap_or(SHRINK_WIDTH_FALLBACK))
                    }
                },
                min_width: col.min_width,
            })
            .collect();
        Self { cols }
    }

    pub fn len(&self) -> usize {
        self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }
}

/// Memo for [`ColGroup::build`], keyed by its inputs.
#[derive(Debug, Default)]
pub struct ColGroupCache {
    key: Option<(Vec<ColSpec>, Option<f32>)>,
    value: Rc<ColGroup>,
    builds: u64,
}

impl ColGroupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the column group for these inputs, rebuilding only when
    /// the columns or the shrink width changed since the last call.
    pub fn get(&mut self, cols: &[ColSpec], shrink_width: Option<f32>) -> Rc<ColGroup> {
        let hit = matches!(
            &self.key,
            Some((cached_cols, cached_width))
                if cached_cols.as_slice() == cols && *cached_width == shrink_width
        );
        if !hit {
            self.value = Rc::new(ColGroup::build(cols, shrink_width));
            self.key = Some((cols.to_vec(), shrink_width));
            self.builds += 1;
        }
        Rc::clone(&self.value)
    }

    /// Number of times the group was actually rebuilt
    pub fn builds(&self) -> u64 {
        self.builds
    }
}
