//! Contract consumed from the scroller viewport hosting each chunk.
//!
//! The scroller itself (scroll event handling, native scrollbars) lives
//! outside this crate; the grid only needs to construct it with a
//! [`ScrollerConfig`] and ask it for measurements.

use serde::{Deserialize, Serialize};

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// CSS overflow policy applied to one axis of a scroller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    /// Clip, never show a scrollbar
    #[default]
    Hidden,
    /// Scrollbar only when content overflows
    Auto,
    /// Always reserve a scrollbar
    Scroll,
}

impl Overflow {
    /// CSS keyword for this policy
    pub fn as_css(self) -> &'static str {
        match self {
            Overflow::Hidden => "hidden",
            Overflow::Auto => "auto",
            Overflow::Scroll => "scroll",
        }
    }
}

/// Construction parameters for a section's scroller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollerConfig {
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    /// Maximum height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f32>,
    /// Scroller stretches to fill a growing cell
    pub v_grow: bool,
}

/// A live scroller viewport.
pub trait ScrollerViewport {
    /// Whether the scroller's content overflows its client box on `axis`.
    ///
    /// This reports need, not the current overflow style: a scroller that
    /// is forced to show a scrollbar but whose content fits returns `false`.
    fn needs_scrolling(&self, axis: Axis) -> bool;
}

/// A mounted scroller element that can report the natural width its
/// shrink-policy cells need.
pub trait ShrinkMeasure {
    /// Widest unconstrained shrink-cell width inside this element, in pixels.
    /// `0.0` when the element contains no shrink cells.
    fn natural_shrink_width(&self) -> f32;
}

impl<T: ScrollerViewport + ?Sized> ScrollerViewport for &T {
    fn needs_scrolling(&self, axis: Axis) -> bool {
        (**self).needs_scrolling(axis)
    }
}

impl<T: ShrinkMeasure + ?Sized> ShrinkMeasure for &T {
    fn natural_shrink_width(&self) -> f32 {
        (**self).natural_shrink_width()
    }
}
