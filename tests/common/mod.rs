//! Common test doubles for driving a `ScrollGrid` without a browser.
//!
//! `FakeScroller` and `FakeElement` hold their geometry in shared cells so
//! a test can change what a mounted section reports between passes, the
//! way content reflow would in a real page.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use scrollgrid::{
    Axis, ChunkSpec, ColSpec, ElementRef, GridProps, ScrollGrid, ScrollerViewport, SectionKind,
    SectionSpec, ShrinkMeasure,
};

// ============================================================================
// Test doubles
// ============================================================================

/// Scroller whose vertical/horizontal overflow can be flipped from the test.
#[derive(Clone, Default)]
pub struct FakeScroller {
    pub overflows_y: Rc<Cell<bool>>,
    pub overflows_x: Rc<Cell<bool>>,
    pub queries: Rc<Cell<u32>>,
}

impl FakeScroller {
    pub fn new(overflows_y: bool) -> Self {
        let scroller = Self::default();
        scroller.overflows_y.set(overflows_y);
        scroller
    }
}

impl ScrollerViewport for FakeScroller {
    fn needs_scrolling(&self, axis: Axis) -> bool {
        self.queries.set(self.queries.get() + 1);
        match axis {
            Axis::Vertical => self.overflows_y.get(),
            Axis::Horizontal => self.overflows_x.get(),
        }
    }
}

/// Scroller element with a natural shrink width the test controls.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeElement {
    pub name: &'static str,
    pub width: Rc<Cell<f32>>,
    pub measured: Rc<Cell<u32>>,
}

impl FakeElement {
    pub fn new(name: &'static str, width: f32) -> Self {
        Self {
            name,
            width: Rc::new(Cell::new(width)),
            measured: Rc::new(Cell::new(0)),
        }
    }
}

impl ShrinkMeasure for FakeElement {
    fn natural_shrink_width(&self) -> f32 {
        self.measured.set(self.measured.get() + 1);
        self.width.get()
    }
}

pub type TestGrid = ScrollGrid<FakeScroller, FakeElement>;

// ============================================================================
// Builders
// ============================================================================

/// A body section hosting a plain chunk.
pub fn chunk_section(kind: SectionKind, content: &str) -> SectionSpec<FakeElement> {
    SectionSpec::chunk(kind, ChunkSpec::new(content))
}

/// Header/body/footer grid over the given columns.
pub fn three_section_props(cols: Vec<ColSpec>) -> GridProps<FakeElement> {
    GridProps::new(
        cols,
        vec![
            chunk_section(SectionKind::Header, "header"),
            chunk_section(SectionKind::Body, "body"),
            chunk_section(SectionKind::Footer, "footer"),
        ],
    )
}

/// Records every value an `ElementRef` receives, by element name.
pub fn recording_ref() -> (Rc<RefCell<Vec<Option<&'static str>>>>, ElementRef<FakeElement>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let element_ref = ElementRef::new(move |el: Option<&FakeElement>| {
        sink.borrow_mut().push(el.map(|e| e.name));
    });
    (log, element_ref)
}

/// Mount one scroller per entry of `sections`: (index, overflows_y, shrink width).
pub fn mount_all(
    grid: &mut TestGrid,
    sections: &[(usize, bool, f32)],
) -> Vec<(FakeScroller, FakeElement)> {
    sections
        .iter()
        .map(|&(index, overflows_y, width)| {
            let scroller = FakeScroller::new(overflows_y);
            let element = FakeElement::new("el", width);
            assert!(grid.mount_section(index, scroller.clone(), element.clone()));
            (scroller, element)
        })
        .collect()
}
