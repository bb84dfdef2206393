//! Browser host for a [`ScrollGrid`]: builds the section DOM from a
//! [`GridRender`](crate::render::GridRender), measures it through web-sys
//! and feeds a `ResizeObserver` on the container into the grid's
//! [`LayoutContext`].

mod build;
mod measure;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ResizeObserver};

use crate::context::LayoutContext;
use crate::grid::{ScrollGrid, SizingOutcome};
use crate::types::GridProps;

pub use build::DomGrid;
pub use measure::{
    DomChunkElement, DomScroller, SHRINK_CELL_CLASS, SHRINK_CUSHION_CLASS, SHRINK_FRAME_CLASS,
};

type DomScrollGrid = ScrollGrid<DomScroller, DomChunkElement>;
type SharedGrid = Rc<RefCell<DomScrollGrid>>;
type SharedDom = Rc<RefCell<Option<DomGrid>>>;

/// Upper bound on render/measure rounds after a single change.
const MAX_SETTLE_ROUNDS: u32 = 4;

/// WASM-exported scroll grid mounted into a container element.
#[wasm_bindgen]
pub struct ScrollGridView {
    container: HtmlElement,
    grid: SharedGrid,
    dom: SharedDom,
    ctx: Rc<LayoutContext>,
    observer: Option<ResizeObserver>,
    #[allow(dead_code)]
    observer_closure: Option<Closure<dyn FnMut(js_sys::Array)>>,
}

#[wasm_bindgen]
impl ScrollGridView {
    /// Build the grid described by `config_json` inside `container`.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the DOM cannot
    /// be built.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, config_json: &str) -> Result<ScrollGridView, JsValue> {
        console_error_panic_hook::set_once();

        let props = GridProps::from_json(config_json)?;
        let grid: SharedGrid = Rc::new(RefCell::new(ScrollGrid::new(props)));
        let dom: SharedDom = Rc::new(RefCell::new(None));
        let ctx = Rc::new(LayoutContext::new());

        rebuild(&container, &grid, &dom)?;

        let weak_grid = Rc::downgrade(&grid);
        let weak_dom = Rc::downgrade(&dom);
        grid.borrow_mut()
            .set_render_callback(Some(Rc::new(move || settle_weak(&weak_grid, &weak_dom))));

        if ScrollGrid::mount(&grid, &ctx) == SizingOutcome::Changed {
            settle(&grid, &dom);
        }

        let (observer, observer_closure) = observe_resize(&container, &ctx);

        Ok(ScrollGridView {
            container,
            grid,
            dom,
            ctx,
            observer,
            observer_closure,
        })
    }

    /// Replace the grid configuration and rebuild the sections.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the DOM cannot
    /// be rebuilt.
    pub fn set_config(&mut self, config_json: &str) -> Result<(), JsValue> {
        let props = GridProps::from_json(config_json)?;
        self.grid.borrow_mut().set_props(props);
        rebuild(&self.container, &self.grid, &self.dom)?;
        settle(&self.grid, &self.dom);
        Ok(())
    }

    /// Signal that the ambient layout size may have changed.
    pub fn resize(&self) {
        self.ctx.notify_resize();
    }

    /// Current layout state as a JS object
    /// (`{ shrink_width, force_vertical_scrollbars }`).
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn layout_state(&self) -> Result<JsValue, JsValue> {
        let state = self.grid.borrow().layout_state();
        serde_wasm_bindgen::to_value(&state)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Tear down the grid: stop observing, release sections, remove DOM.
    ///
    /// Safe to call more than once; dropping the view (`free()` from JS)
    /// runs it too.
    pub fn destroy(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.observer_closure = None;
        ScrollGrid::unmount(&self.grid, &self.ctx);
        if let Some(dom) = self.dom.borrow_mut().take() {
            dom.remove();
        }
    }
}

impl Drop for ScrollGridView {
    fn drop(&mut self) {
        // The observer must stop before its closure is released.
        self.destroy();
    }
}

/// Rebuild the section DOM for the current props and re-register every
/// chunk-bearing section with the grid.
fn rebuild(container: &HtmlElement, grid: &SharedGrid, dom: &SharedDom) -> crate::Result<()> {
    let render = grid.borrow_mut().render();
    if let Some(old) = dom.borrow_mut().take() {
        let mut g = grid.borrow_mut();
        for index in old.section_indices() {
            g.unmount_section(index);
        }
        old.remove();
    }

    let built = DomGrid::build(container, &render)?;
    {
        let mut g = grid.borrow_mut();
        for (index, scroller_el) in built.scrollers() {
            g.mount_section(
                index,
                DomScroller::new(scroller_el.clone()),
                DomChunkElement::new(scroller_el.clone()),
            );
        }
    }
    *dom.borrow_mut() = Some(built);
    Ok(())
}

/// Apply the current layout state to the DOM, re-measuring until the
/// grid reports no further change.
fn settle(grid: &SharedGrid, dom: &SharedDom) {
    for _ in 0..MAX_SETTLE_ROUNDS {
        let render = grid.borrow_mut().render();
        if let Some(dom) = dom.borrow().as_ref() {
            dom.apply(&render);
        }
        if grid.borrow_mut().did_update() != SizingOutcome::Changed {
            return;
        }
    }
    tracing::warn!(rounds = MAX_SETTLE_ROUNDS, "layout did not settle");
}

fn settle_weak(grid: &Weak<RefCell<DomScrollGrid>>, dom: &Weak<RefCell<Option<DomGrid>>>) {
    if let (Some(grid), Some(dom)) = (grid.upgrade(), dom.upgrade()) {
        settle(&grid, &dom);
    }
}

fn observe_resize(
    container: &HtmlElement,
    ctx: &Rc<LayoutContext>,
) -> (
    Option<ResizeObserver>,
    Option<Closure<dyn FnMut(js_sys::Array)>>,
) {
    let ctx = Rc::clone(ctx);
    let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
        ctx.notify_resize();
    }) as Box<dyn FnMut(js_sys::Array)>);
    match ResizeObserver::new(closure.as_ref().unchecked_ref()) {
        Ok(observer) => {
            observer.observe(container);
            (Some(observer), Some(closure))
        }
        Err(_) => {
            tracing::warn!("ResizeObserver unavailable; call resize() manually");
            (None, None)
        }
    }
}
