//! Keyed registry of live child instances.
//!
//! Sections register their scroller (and the scroller's element) here when
//! they mount and remove them when they unmount. The grid only reads the
//! registry during sizing passes, never while producing a render.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// Callback that mirrors a registry entry into an external collaborator.
///
/// Receives `Some(value)` when the entry is registered and `None` when it is
/// removed, so the collaborator's reference always matches mount state.
pub struct ElementRef<V>(Rc<dyn Fn(Option<&V>)>);

impl<V> ElementRef<V> {
    /// Wrap a closure as an element reference callback.
    pub fn new(f: impl Fn(Option<&V>) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Forward the current value (or its absence).
    pub fn set(&self, value: Option<&V>) {
        (self.0)(value);
    }
}

impl<V> Clone for ElementRef<V> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

// Identity comparison: two refs are equal when they share the same closure.
impl<V> PartialEq for ElementRef<V> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<V> fmt::Debug for ElementRef<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ElementRef(..)")
    }
}

struct Entry<V> {
    value: V,
    on_change: Option<ElementRef<V>>,
}

/// Map from a stable key to a live instance.
///
/// `get_all` makes no ordering promise; consumers must reduce with
/// order-independent operations (max, any).
pub struct RefRegistry<K, V> {
    entries: HashMap<K, Entry<V>>,
}

impl<K, V> Default for RefRegistry<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq + Copy + fmt::Debug, V> RefRegistry<K, V> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `key`, replacing any previous entry.
    pub fn register(&mut self, key: K, value: V) {
        self.insert(key, value, None);
    }

    /// Register `value` under `key` with a side-effect callback.
    ///
    /// The callback fires synchronously with `Some(&value)` now and with
    /// `None` when the entry is later unregistered or replaced.
    pub fn register_with(&mut self, key: K, value: V, on_change: ElementRef<V>) {
        self.insert(key, value, Some(on_change));
    }

    fn insert(&mut self, key: K, value: V, on_change: Option<ElementRef<V>>) {
        self.unregister(key);
        if let Some(callback) = &on_change {
            callback.set(Some(&value));
        }
        tracing::trace!(?key, "registered");
        self.entries.insert(key, Entry { value, on_change });
    }

    /// Remove the entry under `key`, notifying its callback with `None`.
    pub fn unregister(&mut self, key: K) -> Option<V> {
        let entry = self.entries.remove(&key)?;
        if let Some(callback) = &entry.on_change {
            callback.set(None);
        }
        tracing::trace!(?key, "unregistered");
        Some(entry.value)
    }

    /// Look up a single entry.
    pub fn get(&self, key: K) -> Option<&V> {
        self.entries.get(&key).map(|e| &e.value)
    }

    /// All live values, in no particular order.
    pub fn get_all(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|e| &e.value)
    }

    /// All live keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.keys().copied()
    }

    pub fn contains(&self, key: K) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unregister every entry, firing each callback with `None`.
    pub fn clear(&mut self) {
        let keys: Vec<K> = self.keys().collect();
        for key in keys {
            self.unregister(key);
        }
    }
}
