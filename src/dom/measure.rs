//! Live DOM measurements backing the scroller traits.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::scroller::{Axis, ScrollerViewport, ShrinkMeasure};

/// Class marking a shrink-column cell inside chunk content
pub const SHRINK_CELL_CLASS: &str = "scrollgrid-shrink";
/// Class of the element spanning the shrink cell's full inner width
pub const SHRINK_FRAME_CLASS: &str = "scrollgrid-shrink-frame";
/// Class of the element wrapping only the cell's natural content
pub const SHRINK_CUSHION_CLASS: &str = "scrollgrid-shrink-cushion";

/// A section's scroller element, queried for overflow.
#[derive(Debug, Clone, PartialEq)]
pub struct DomScroller {
    el: HtmlElement,
}

impl DomScroller {
    pub fn new(el: HtmlElement) -> Self {
        Self { el }
    }
}

impl ScrollerViewport for DomScroller {
    // scrollHeight/scrollWidth report the content extent regardless of the
    // overflow style, so a forced scrollbar does not count as need.
    fn needs_scrolling(&self, axis: Axis) -> bool {
        match axis {
            Axis::Vertical => self.el.scroll_height() > self.el.client_height(),
            Axis::Horizontal => self.el.scroll_width() > self.el.client_width(),
        }
    }
}

/// A section's scroller element, measured for shrink columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DomChunkElement {
    el: HtmlElement,
}

impl DomChunkElement {
    pub fn new(el: HtmlElement) -> Self {
        Self { el }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.el
    }
}

impl ShrinkMeasure for DomChunkElement {
    fn natural_shrink_width(&self) -> f32 {
        let Ok(cells) = self.el.query_selector_all(&format!(".{SHRINK_CELL_CLASS}")) else {
            return 0.0;
        };
        let mut widest: f64 = 0.0;
        for i in 0..cells.length() {
            let Some(cell) = cells.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            widest = widest.max(smallest_cell_width(&cell));
        }
        // Pixel widths are far inside f32 range.
        #[allow(clippy::cast_possible_truncation)]
        let width = widest.ceil() as f32;
        width
    }
}

/// Width the cell would need if it only had to fit its natural content:
/// the cell's width minus the frame's, plus the cushion's.
fn smallest_cell_width(cell: &Element) -> f64 {
    let cell_width = cell.get_bounding_client_rect().width();
    let frame = cell
        .query_selector(&format!(".{SHRINK_FRAME_CLASS}"))
        .ok()
        .flatten();
    let cushion = cell
        .query_selector(&format!(".{SHRINK_CUSHION_CLASS}"))
        .ok()
        .flatten();
    match (frame, cushion) {
        (Some(frame), Some(cushion)) => {
            cell_width - frame.get_bounding_client_rect().width()
                + cushion.get_bounding_client_rect().width()
        }
        _ => cell_width,
    }
}
