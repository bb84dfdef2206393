//! Sizing engine for keeping sections aligned.
//!
//! This module handles:
//! - Static and measured geometry decisions (shrink width, forced scrollbars)
//! - The shared layout state written by each sizing pass
//! - The micro-column-group shared verbatim by every section

mod col_group;
mod geometry;
mod state;

pub use col_group::{ColGroup, ColGroupCache, ColRender, ColWidth, SHRINK_WIDTH_FALLBACK};
pub use geometry::{
    compute_force_scrollbars, compute_shrink_width, has_shrink_width, needs_vertical_scrolling,
    section_has_v_grow,
};
pub use state::LayoutState;
