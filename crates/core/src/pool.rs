//! Free-list object pool.
//!
//! Single-threaded counterpart of a synchronized pool: values handed back
//! with [`Pool::put`] are returned by later [`Pool::get`] calls in LIFO order,
//! and a factory closure builds fresh values when the free list is empty.
//! The pool never resets values; callers clear them before `put` or after `get`.

use std::fmt;

pub struct Pool<T> {
    items: Vec<T>,
    factory: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T> Pool<T> {
    /// Creates an empty pool that builds new values with `factory`.
    pub fn new(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            factory: Box::new(factory),
        }
    }

    /// Takes a pooled value, or builds one if none is available.
    pub fn get(&mut self) -> T {
        match self.items.pop() {
            Some(item) => item,
            None => (self.factory)(),
        }
    }

    /// Returns a value to the free list.
    pub fn put(&mut self, item: T) {
        self.items.push(item);
    }

    /// Number of values waiting in the free list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every pooled value.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Default + 'static> Default for Pool<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool").field("len", &self.items.len()).finish()
    }
}
