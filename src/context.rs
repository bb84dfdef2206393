//! Resize signal shared by the grids living inside one layout container.
//!
//! The surrounding container calls [`LayoutContext::notify_resize`] whenever
//! the ambient size may have changed (window resize, container resize);
//! mounted grids listen to re-run their sizing pass.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`LayoutContext::add_resize_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn()>;

/// Registry of resize listeners.
#[derive(Default)]
pub struct LayoutContext {
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for LayoutContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl LayoutContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resize_listener(&self, listener: impl Fn() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_resize_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Invoke every listener registered at the time of the call.
    ///
    /// Listeners may add or remove listeners while being notified.
    pub fn notify_resize(&self) {
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        tracing::trace!(listeners = snapshot.len(), "resize signal");
        for listener in snapshot {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}
