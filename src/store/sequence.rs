use super::guard::{StoreReadGuard, StoreWriteGuard};
use crate::error::StoreResult;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;

/// Thread-safe ordered sequence guarded by one reader/writer lock
///
/// `Store` owns a growable sequence of `T` behind an `Arc<RwLock<_>>`.
/// Cloning a `Store` is cheap and yields another handle onto the same
/// sequence, so a store can be handed to many producer threads at once.
///
/// ## Thread Safety
///
/// Readers (`len`, `get`, `get_all`, shared enumerate, the codec) share the
/// lock; writers (`add`, `pop`, `replace`, `reset`, updating enumerate) get
/// exclusive access. Writers block under contention; there is no timeout.
/// The lock is not reentrant: code running while a guard is held, including an
/// enumerate callback, must not call back into the same store.
///
/// ## Order
///
/// Elements keep insertion order. `replace` overwrites in place and deletions
/// during an enumerate pass close the gap without reordering the survivors.
/// Indices are positional only, so an index captured before a mutating call
/// may name a different element afterwards.
#[derive(Debug)]
pub struct Store<T> {
    pub(crate) data: Arc<RwLock<VecDeque<T>>>,
}

impl<T> Store<T> {
    /// Create an empty store
    ///
    /// `capacity` pre-reserves backing storage; it never limits how many
    /// elements the store may hold.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
        }
    }

    /// Discard every element and re-reserve `capacity` slots
    ///
    /// Takes the write lock, so it waits for in-flight readers and no reader
    /// can observe a half-reset store.
    pub fn reset(&self, capacity: usize) {
        *self.data.write() = VecDeque::with_capacity(capacity);
    }

    /// Number of elements currently stored
    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    /// Returns `true` if the store holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append one element at the end
    pub fn add(&self, elem: T) {
        self.lock().add(elem);
    }

    /// Replace the whole sequence with `elems`
    pub fn set(&self, elems: Vec<T>) {
        self.lock().set(elems);
    }

    /// Append every element yielded by `elems`, in order
    ///
    /// The iterator is drained before the lock is taken, so a lazy iterator
    /// that reads from this store does not deadlock.
    pub fn extend<I>(&self, elems: I)
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = elems.into_iter().collect();
        self.lock().extend(items);
    }

    /// Remove and return the first element
    ///
    /// The remaining elements keep their order. Returns `None` when empty.
    pub fn pop(&self) -> Option<T> {
        self.lock().pop()
    }

    /// Overwrite the element at `idx`
    ///
    /// Fails with [`StoreError::IndexOutOfRange`](crate::StoreError::IndexOutOfRange)
    /// and leaves the sequence untouched when `idx >= len()`.
    pub fn replace(&self, idx: usize, elem: T) -> StoreResult<()> {
        self.lock().replace(idx, elem)
    }

    /// Acquire the write lock for a compound critical section
    ///
    /// The returned guard exposes the store operations directly. The lock is
    /// released when the guard is dropped or [`StoreWriteGuard::unlock`] is
    /// called. This is the only way to make several operations atomic, e.g.
    /// "pop only if the length is above a threshold".
    pub fn lock(&self) -> StoreWriteGuard<'_, T> {
        StoreWriteGuard::new(self.data.write())
    }

    /// Acquire the read lock for a consistent multi-step read
    pub fn read_lock(&self) -> StoreReadGuard<'_, T> {
        StoreReadGuard::new(self.data.read())
    }

    /// Returns `true` if both handles share the same sequence
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl<T: Clone> Store<T> {
    /// Return a copy of the element at `idx`, or `None` if out of range
    pub fn get(&self, idx: usize) -> Option<T> {
        self.read_lock().get(idx).cloned()
    }

    /// Return an independent snapshot of every element in order
    ///
    /// The snapshot is taken under the read lock and shares nothing with the
    /// store afterwards.
    pub fn get_all(&self) -> Vec<T> {
        self.read_lock().to_vec()
    }

    /// Append a snapshot of `other`'s elements to the end of this store
    ///
    /// `other` is copied under its own read lock before this store's write
    /// lock is taken, so appending a store to itself (or to a clone of
    /// itself) duplicates its contents instead of deadlocking.
    pub fn append(&self, other: &Store<T>) {
        let items = other.get_all();
        self.lock().extend(items);
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> From<Vec<T>> for Store<T> {
    fn from(elems: Vec<T>) -> Self {
        Self {
            data: Arc::new(RwLock::new(VecDeque::from(elems))),
        }
    }
}

impl<T> FromIterator<T> for Store<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: Arc::new(RwLock::new(iter.into_iter().collect())),
        }
    }
}
