//! The grid coordinator.
//!
//! `ScrollGrid` owns the shared [`LayoutState`] and the registries of
//! mounted section scrollers. The host drives it through an explicit
//! lifecycle:
//!
//! - `mount` / `did_mount`: listen for resize signals, run the first sizing pass
//! - `set_props` + `did_update`: re-run sizing only when a sizing input changed
//! - `handle_resize`: re-run sizing after the ambient size changed
//! - `unmount` / `will_unmount`: stop listening, release every section
//!
//! A sizing pass records the inputs it observed *before* writing its result.
//! A pass that changes the state therefore allows exactly one follow-up pass
//! on the next update, which converges because the measurements are
//! idempotent for stable geometry.

use std::cell::RefCell;
use std::rc::Rc;

use crate::context::{LayoutContext, ListenerId};
use crate::layout::{
    compute_force_scrollbars, compute_shrink_width, has_shrink_width, ColGroupCache, LayoutState,
};
use crate::registry::{ElementRef, RefRegistry};
use crate::render::{render_grid, GridRender};
use crate::scroller::{Axis, ScrollerViewport, ShrinkMeasure};
use crate::types::{GridProps, SectionSpec};

/// Lifecycle phase of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, not yet mounted
    Uninitialized,
    /// Mounted; layout state reflects at least one sizing pass
    Sized,
    /// Unmounted; further lifecycle calls are ignored
    Disposed,
}

/// What a lifecycle call did to the layout state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingOutcome {
    /// No sizing pass ran
    Skipped,
    /// A pass ran and produced the same state
    Unchanged,
    /// A pass ran and wrote a new state; the host should re-render
    Changed,
}

/// Sizing inputs observed by the latest pass: a revision counter bumped
/// whenever a sizing-relevant input changes, plus the state itself.
type SizingKey = (u64, LayoutState);

/// Coordinator for one grid.
///
/// `S` is the scroller viewport type and `E` the scroller element type
/// measured for shrink columns.
pub struct ScrollGrid<S, E> {
    props: GridProps<E>,
    state: LayoutState,
    phase: Phase,
    scrollers: RefRegistry<usize, S>,
    scroller_els: RefRegistry<usize, E>,
    sizing_revision: u64,
    last_sizing: Option<SizingKey>,
    col_group: ColGroupCache,
    resize_listener: Option<ListenerId>,
    render_callback: Option<Rc<dyn Fn()>>,
    sizing_passes: u64,
}

impl<S, E> ScrollGrid<S, E>
where
    S: ScrollerViewport,
    E: ShrinkMeasure + PartialEq,
{
    pub fn new(props: GridProps<E>) -> Self {
        Self {
            props,
            state: LayoutState::default(),
            phase: Phase::Uninitialized,
            scrollers: RefRegistry::new(),
            scroller_els: RefRegistry::new(),
            sizing_revision: 0,
            last_sizing: None,
            col_group: ColGroupCache::new(),
            resize_listener: None,
            render_callback: None,
            sizing_passes: 0,
        }
    }

    pub fn props(&self) -> &GridProps<E> {
        &self.props
    }

    pub fn layout_state(&self) -> LayoutState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Total number of sizing passes run so far
    pub fn sizing_passes(&self) -> u64 {
        self.sizing_passes
    }

    /// Indices of sections with a mounted scroller, ascending
    pub fn mounted_sections(&self) -> Vec<usize> {
        let mut keys: Vec<usize> = self.scrollers.keys().collect();
        keys.sort_unstable();
        keys
    }

    /// Called after a resize signal changed the layout state
    pub fn set_render_callback(&mut self, callback: Option<Rc<dyn Fn()>>) {
        self.render_callback = callback;
    }

    /// Register the scroller (and its element) of the section at `index`.
    ///
    /// The element is forwarded to the chunk's `element_ref`, if any.
    /// Returns `false` when the section does not host a scroller (an
    /// override section or a chunk with outer content) or the grid has
    /// been disposed.
    pub fn mount_section(&mut self, index: usize, scroller: S, element: E) -> bool {
        if self.phase == Phase::Disposed {
            tracing::debug!(index, "mount_section after dispose ignored");
            return false;
        }
        let Some(chunk) = self
            .props
            .sections
            .get(index)
            .and_then(SectionSpec::scroller_chunk)
        else {
            tracing::debug!(index, "section hosts no scroller; not registered");
            return false;
        };
        let element_ref = chunk.element_ref.clone();
        self.scrollers.register(index, scroller);
        self.register_element(index, element, element_ref);
        self.sizing_revision += 1;
        true
    }

    /// Release the scroller of the section at `index`.
    ///
    /// The chunk's `element_ref` receives `None`.
    pub fn unmount_section(&mut self, index: usize) -> bool {
        let had_scroller = self.scrollers.unregister(index).is_some();
        let had_element = self.scroller_els.unregister(index).is_some();
        if had_scroller || had_element {
            self.sizing_revision += 1;
        }
        had_scroller || had_element
    }

    fn register_element(&mut self, index: usize, element: E, element_ref: Option<ElementRef<E>>) {
        match element_ref {
            Some(callback) => self.scroller_els.register_with(index, element, callback),
            None => self.scroller_els.register(index, element),
        }
    }

    /// First sizing pass after the sections mounted.
    pub fn did_mount(&mut self) -> SizingOutcome {
        if self.phase != Phase::Uninitialized {
            tracing::debug!(phase = ?self.phase, "did_mount ignored");
            return SizingOutcome::Skipped;
        }
        self.phase = Phase::Sized;
        self.run_sizing_pass()
    }

    /// Replace the configuration.
    ///
    /// Sections that no longer host a chunk are unmounted. Mounted sections
    /// whose chunk got a different `element_ref` are re-registered so the
    /// new callback sees the element and the old one sees `None`.
    pub fn set_props(&mut self, props: GridProps<E>) {
        if sizing_inputs_differ(&self.props, &props) {
            self.sizing_revision += 1;
        }
        let old = std::mem::replace(&mut self.props, props);

        let mounted: Vec<usize> = self.scroller_els.keys().collect();
        for index in mounted {
            let new_ref = self
                .props
                .sections
                .get(index)
                .and_then(SectionSpec::scroller_chunk)
                .map(|chunk| chunk.element_ref.clone());
            let Some(new_ref) = new_ref else {
                tracing::debug!(index, "section no longer hosts a scroller; unmounting");
                self.unmount_section(index);
                continue;
            };
            let old_ref = old
                .sections
                .get(index)
                .and_then(SectionSpec::scroller_chunk)
                .and_then(|chunk| chunk.element_ref.clone());
            if old_ref != new_ref {
                if let Some(element) = self.scroller_els.unregister(index) {
                    self.register_element(index, element, new_ref);
                }
            }
        }
    }

    /// Re-run sizing if any sizing input changed since the last pass.
    pub fn did_update(&mut self) -> SizingOutcome {
        if self.phase != Phase::Sized {
            tracing::debug!(phase = ?self.phase, "did_update ignored");
            return SizingOutcome::Skipped;
        }
        if self.last_sizing == Some(self.sizing_key()) {
            return SizingOutcome::Skipped;
        }
        self.run_sizing_pass()
    }

    /// Re-run sizing after the ambient layout size may have changed.
    pub fn handle_resize(&mut self) -> SizingOutcome {
        if self.phase != Phase::Sized {
            tracing::debug!(phase = ?self.phase, "resize ignored");
            return SizingOutcome::Skipped;
        }
        self.run_sizing_pass()
    }

    /// Release every section and stop reacting to lifecycle calls.
    ///
    /// Returns the resize listener the caller must remove from its
    /// [`LayoutContext`], if one was registered through [`Self::mount`].
    pub fn will_unmount(&mut self) -> Option<ListenerId> {
        if self.phase == Phase::Disposed {
            return None;
        }
        self.scrollers.clear();
        self.scroller_els.clear();
        self.phase = Phase::Disposed;
        self.render_callback = None;
        self.resize_listener.take()
    }

    /// Render description for the current configuration and layout state.
    ///
    /// Print rendering gets an empty column group so the table lays out
    /// columns from content alone.
    pub fn render(&mut self) -> GridRender {
        let col_group = if self.props.print {
            self.col_group.get(&[], None)
        } else {
            self.col_group.get(&self.props.cols, self.state.shrink_width)
        };
        render_grid(&self.props, &self.state, &col_group)
    }

    /// Number of times the shared column group had to be rebuilt
    pub fn col_group_builds(&self) -> u64 {
        self.col_group.builds()
    }

    fn sizing_key(&self) -> SizingKey {
        (self.sizing_revision, self.state)
    }

    fn run_sizing_pass(&mut self) -> SizingOutcome {
        self.last_sizing = Some(self.sizing_key());
        self.sizing_passes += 1;

        let shrink_width = if has_shrink_width(&self.props.cols) && !self.props.print {
            Some(compute_shrink_width(self.scroller_els.get_all()))
        } else {
            self.state.shrink_width
        };
        let force_vertical_scrollbars =
            compute_force_scrollbars(self.scrollers.get_all(), Axis::Vertical);

        let next = LayoutState::new(shrink_width, force_vertical_scrollbars);
        let outcome = if next == self.state {
            SizingOutcome::Unchanged
        } else {
            SizingOutcome::Changed
        };
        self.state = next;

        tracing::debug!(
            pass = self.sizing_passes,
            shrink_width = ?next.shrink_width,
            force_vertical_scrollbars,
            viewports = self.scrollers.len(),
            ?outcome,
            "sizing pass"
        );
        outcome
    }
}

impl<S, E> ScrollGrid<S, E>
where
    S: ScrollerViewport + 'static,
    E: ShrinkMeasure + PartialEq + 'static,
{
    /// Mount a shared grid: listen for resize signals on `ctx` and run the
    /// first sizing pass.
    ///
    /// On resize the grid re-sizes itself and, if the state changed,
    /// invokes its render callback after releasing its borrow.
    pub fn mount(this: &Rc<RefCell<Self>>, ctx: &LayoutContext) -> SizingOutcome {
        let weak = Rc::downgrade(this);
        let id = ctx.add_resize_listener(move || {
            if let Some(grid) = weak.upgrade() {
                Self::dispatch_resize(&grid);
            }
        });
        let mut grid = this.borrow_mut();
        grid.resize_listener = Some(id);
        grid.did_mount()
    }

    /// Unmount a shared grid and remove its resize listener from `ctx`.
    pub fn unmount(this: &Rc<RefCell<Self>>, ctx: &LayoutContext) {
        let listener = this.borrow_mut().will_unmount();
        if let Some(id) = listener {
            ctx.remove_resize_listener(id);
        }
    }

    fn dispatch_resize(this: &Rc<RefCell<Self>>) {
        let callback = {
            let Ok(mut grid) = this.try_borrow_mut() else {
                tracing::debug!("grid busy; resize signal dropped");
                return;
            };
            match grid.handle_resize() {
                SizingOutcome::Changed => grid.render_callback.clone(),
                SizingOutcome::Unchanged | SizingOutcome::Skipped => None,
            }
        };
        if let Some(callback) = callback {
            callback();
        }
    }
}

/// Columns, sections, vertical growth and print mode are the configuration
/// inputs that can change measurable geometry.
fn sizing_inputs_differ<E: PartialEq>(old: &GridProps<E>, new: &GridProps<E>) -> bool {
    old.cols != new.cols
        || old.sections != new.sections
        || old.v_grow != new.v_grow
        || old.print != new.print
}
