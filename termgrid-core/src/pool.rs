//! LIFO object pool for rows and cells.
//!
//! The grid never drops a row or cell while it is alive: shrinking pushes
//! the excess here, growing pops before allocating. Pooled objects keep
//! their allocations (a row keeps its cell vector), so a resize storm does
//! not churn the allocator.

/// A stack of reusable objects.
#[derive(Debug, Default)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Pool { items: Vec::new() }
    }

    /// Park an object for later reuse.
    pub fn put(&mut self, item: T) {
        self.items.push(item);
    }

    /// Pop the most recently parked object, if any. The caller is
    /// responsible for resetting it before use.
    pub fn take(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Pop a pooled object or build a fresh one.
    pub fn take_or_else(&mut self, create: impl FnOnce() -> T) -> T {
        self.items.pop().unwrap_or_else(create)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
