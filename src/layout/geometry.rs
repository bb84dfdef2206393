//! Pure sizing helpers shared by every section.
//!
//! Reductions over mounted viewports use max/any semantics so the result
//! does not depend on registry iteration order.

use crate::scroller::{Axis, ScrollerViewport, ShrinkMeasure};
use crate::types::{ChunkSpec, ColSpec, GridProps, SectionSpec};

/// Whether a section is expected to overflow vertically, from configuration
/// alone (no measurement).
///
/// A section with a max-height can always overflow; otherwise only sections
/// that grow with a growing grid are given a scrolling viewport.
pub fn needs_vertical_scrolling<E>(
    grid: &GridProps<E>,
    section: &SectionSpec<E>,
    _chunk: &ChunkSpec<E>,
) -> bool {
    section.max_height.is_some() || section_has_v_grow(grid, section)
}

/// Section cell should stretch to fill the grid's height
pub fn section_has_v_grow<E>(grid: &GridProps<E>, section: &SectionSpec<E>) -> bool {
    grid.v_grow && section.v_grow
}

pub fn has_shrink_width(cols: &[ColSpec]) -> bool {
    cols.iter().any(ColSpec::is_shrink)
}

/// Widest natural shrink width across all mounted elements.
///
/// Returns `0.0` for an empty set.
pub fn compute_shrink_width<I>(elements: I) -> f32
where
    I: IntoIterator,
    I::Item: ShrinkMeasure,
{
    elements
        .into_iter()
        .map(|el| {
            let width = el.natural_shrink_width();
            tracing::trace!(width, "measured shrink width");
            width
        })
        .fold(0.0, f32::max)
}

/// True when any mounted viewport needs a scrollbar on `axis`.
///
/// Returns `false` for an empty set.
pub fn compute_force_scrollbars<I>(viewports: I, axis: Axis) -> bool
where
    I: IntoIterator,
    I::Item: ScrollerViewport,
{
    viewports
        .into_iter()
        .any(|viewport| viewport.needs_scrolling(axis))
}
