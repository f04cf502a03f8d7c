//! Manual lock guards for compound critical sections.
//!
//! [`Store::lock`](super::Store::lock) and
//! [`Store::read_lock`](super::Store::read_lock) hand out these guards. While a
//! guard is alive the caller holds the store's lock and can run several
//! operations as one atomic unit. Releasing happens on drop, or explicitly via
//! `unlock()`.
//!
//! Holding a guard and then calling any method on the same store (through
//! the guarded handle or a clone) deadlocks.

use crate::error::{StoreError, StoreResult};
use parking_lot::{RwLockReadGuard, RwLockWriteGuard};
use std::collections::VecDeque;
use std::collections::vec_deque::Iter;

/// Shared access to a store's sequence
pub struct StoreReadGuard<'a, T> {
    list: RwLockReadGuard<'a, VecDeque<T>>,
}

impl<'a, T> StoreReadGuard<'a, T> {
    pub(super) fn new(list: RwLockReadGuard<'a, VecDeque<T>>) -> Self {
        Self { list }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Borrow the element at `idx`
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.list.get(idx)
    }

    /// Iterate the elements in order
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// Copy the elements out in order
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.list.iter().cloned().collect()
    }

    /// Release the read lock
    pub fn unlock(self) {}
}

/// Exclusive access to a store's sequence
pub struct StoreWriteGuard<'a, T> {
    list: RwLockWriteGuard<'a, VecDeque<T>>,
}

impl<'a, T> StoreWriteGuard<'a, T> {
    pub(super) fn new(list: RwLockWriteGuard<'a, VecDeque<T>>) -> Self {
        Self { list }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.list.get(idx)
    }

    /// Mutably borrow the element at `idx`
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.list.get_mut(idx)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    pub fn add(&mut self, elem: T) {
        self.list.push_back(elem);
    }

    pub fn set(&mut self, elems: Vec<T>) {
        *self.list = VecDeque::from(elems);
    }

    pub fn extend<I>(&mut self, elems: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.list.extend(elems);
    }

    /// Remove and return the first element
    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// Overwrite the element at `idx` in place
    pub fn replace(&mut self, idx: usize, elem: T) -> StoreResult<()> {
        let len = self.list.len();
        match self.list.get_mut(idx) {
            Some(slot) => {
                *slot = elem;
                Ok(())
            }
            None => Err(StoreError::index_out_of_range(idx, len)),
        }
    }

    /// Drop every element, keeping the allocation
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Release the write lock
    pub fn unlock(self) {}
}
