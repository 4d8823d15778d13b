//! Shared property cells.
//!
//! [`Property<T>`] wraps a value behind a lock so that a model shared as
//! `Arc<dyn …>` can still mutate its own fields. It does not notify anyone by
//! itself; the owning model decides which slot to fire after a write.
//!
//! # Example
//!
//! ```
//! use bradel_core::{Property, Slot};
//!
//! struct Header {
//!     title: Property<Option<String>>,
//!     title_did_change: Slot<Option<String>>,
//! }
//!
//! impl Header {
//!     fn set_title(&self, title: Option<String>) {
//!         self.title.store(title.clone());
//!         self.title_did_change.emit(title);
//!     }
//! }
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value with interior mutability.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Creates a property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Reads the value through a closure without cloning it.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Writes the value unconditionally and returns the previous one.
    ///
    /// Use this when every write counts as a change, even when the new value
    /// equals the old one.
    pub fn store(&self, value: T) -> T {
        std::mem::replace(&mut *self.value.write(), value)
    }

    /// Writes the value without reporting anything.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &*self.value.read())
            .finish()
    }
}
