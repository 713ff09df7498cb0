//! Append-only typed pool.
//!
//! Network elements are created once while the network is built and live
//! until the whole pool is dropped. There is no per-element removal, so a
//! handle stays valid for the life of the arena that issued it.
//!
//! ```
//! use pf_core::Arena;
//!
//! let mut arena: Arena<&str> = Arena::new();
//! let a = arena.alloc("P1").unwrap();
//! let b = arena.alloc("P2").unwrap();
//! assert_eq!(arena.get(a), Some(&"P1"));
//! assert_eq!(b.index(), 1);
//! ```

use rayon::prelude::*;

use crate::error::{PfError, PfResult};
use crate::ids::Id;

/// Contiguous storage that hands out [`Id`] handles.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocate room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Handle the next allocation will receive.
    fn next_id(&self) -> PfResult<Id> {
        u32::try_from(self.items.len())
            .ok()
            .and_then(Id::try_from_index)
            .ok_or(PfError::ArenaFull {
                len: self.items.len(),
            })
    }

    /// Store `value` and return its handle.
    pub fn alloc(&mut self, value: T) -> PfResult<Id> {
        self.alloc_with(|_| value)
    }

    /// Reserve a slot, then build the value in it.
    ///
    /// The closure receives the handle the value will live under, so the
    /// value can record its own id.
    pub fn alloc_with<F>(&mut self, build: F) -> PfResult<Id>
    where
        F: FnOnce(Id) -> T,
    {
        let id = self.next_id()?;
        self.items.push(build(id));
        Ok(id)
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.items.get(id.as_usize())
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        self.items.get_mut(id.as_usize())
    }

    /// Like [`Arena::get`], but reports a foreign handle as an error.
    pub fn try_get(&self, id: Id) -> PfResult<&T> {
        let len = self.items.len();
        self.items.get(id.as_usize()).ok_or(PfError::IndexOob {
            what: "arena handle",
            index: id.as_usize(),
            len,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, v)| (Id::from_index(i as u32), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Id, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (Id::from_index(i as u32), v))
    }
}

impl<T: Send> Arena<T> {
    /// Parallel mutable iteration, one element per task.
    ///
    /// Each element is handed to exactly one worker, which is the only safe
    /// partition for elements that carry no internal locking.
    pub fn par_iter_mut(&mut self) -> impl ParallelIterator<Item = (Id, &mut T)> {
        self.items
            .par_iter_mut()
            .enumerate()
            .map(|(i, v)| (Id::from_index(i as u32), v))
    }

    /// Run `f` on every element in parallel.
    pub fn par_for_each_mut<F>(&mut self, f: F)
    where
        F: Fn(Id, &mut T) + Send + Sync,
    {
        self.par_iter_mut().for_each(|(id, v)| f(id, v));
    }
}
