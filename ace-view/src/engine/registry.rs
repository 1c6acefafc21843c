//! Handles for script objects that cross into Rust.
//!
//! The registry holds at most `capacity` unpinned objects and evicts the
//! least recently used one when a new object would exceed that. Pinned
//! objects (page globals such as `editor`) are never evicted.

use crate::bridge::ObjectRef;

/// Object identity as the script realm defines it.
pub(crate) trait Identity {
    fn same(&self, other: &Self) -> bool;
}

/// Default number of unpinned objects kept alive.
pub(crate) const DEFAULT_CAPACITY: usize = 64;

struct Entry<T> {
    handle: ObjectRef,
    value: T,
    pinned: bool,
}

/// Handle table ordered from least to most recently used.
pub(crate) struct HandleRegistry<T> {
    entries: Vec<Entry<T>>,
    last_handle: u64,
    capacity: usize,
}

impl<T: Identity> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<T: Identity> HandleRegistry<T> {
    pub(crate) const fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::new(), last_handle: 0, capacity }
    }

    /// Returns the handle of `value`, issuing a new one the first time it is seen.
    pub(crate) fn register(&mut self, value: T, pinned: bool) -> ObjectRef {
        if let Some(index) = self.entries.iter().position(|entry| entry.value.same(&value)) {
            let mut entry = self.entries.remove(index);
            entry.pinned |= pinned;
            let handle = entry.handle;
            self.entries.push(entry);
            return handle;
        }

        self.last_handle += 1;
        let handle = ObjectRef::new(self.last_handle);
        self.entries.push(Entry { handle, value, pinned });
        self.evict();
        handle
    }

    /// The object behind `handle`, if it is still registered.
    pub(crate) fn lookup(&mut self, handle: ObjectRef) -> Option<&T> {
        let index = self.entries.iter().position(|entry| entry.handle == handle)?;
        let entry = self.entries.remove(index);
        self.entries.push(entry);
        self.entries.last().map(|entry| &entry.value)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn evict(&mut self) {
        while self.entries.iter().filter(|entry| !entry.pinned).count() > self.capacity {
            let Some(oldest) = self.entries.iter().position(|entry| !entry.pinned) else {
                return;
            };
            let evicted = self.entries.remove(oldest);
            log::trace!("evicted script object {}", evicted.handle);
        }
    }
}
