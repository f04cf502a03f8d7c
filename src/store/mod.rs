//! # Ordered Store
//!
//! This module provides [`Store`], a generic ordered sequence that many
//! threads can read and write at once.
//!
//! ## 🎯 Purpose
//!
//! Producers push elements with `add` from any thread while a consumer
//! periodically walks the sequence with `enumerate` to transform, filter or
//! drop elements, or takes a snapshot with `get_all`. The bulk JSON codec in
//! [`crate::codec`] exports and imports whole stores at process boundaries.
//!
//! ## 🔒 Locking Model
//!
//! Each store owns exactly one reader/writer lock:
//! - Read operations (`len`, `get`, `get_all`, shared `enumerate`, JSON export)
//!   take the shared half
//! - Mutations (`add`, `set`, `append`, `pop`, `replace`, `reset`, updating
//!   `enumerate`) take the exclusive half
//!
//! Single operations are atomic. For compound atomicity, take a guard with
//! [`Store::lock`] or [`Store::read_lock`] and run the steps through it.
//!
//! ## ⚠️ Reentrancy
//!
//! The lock is not reentrant. An enumerate callback runs with the lock held,
//! so it must only inspect (or, with `enumerate_mut`, modify) the element it
//! was given. Calling back into the same store from the callback deadlocks.
//!
//! ## 📋 Method Reference
//!
//! | Method | Lock | Purpose |
//! |--------|------|---------|
//! | `new` / `reset` | write | Create or clear with a capacity hint |
//! | `len` | read | Current number of elements |
//! | `add` | write | Append one element |
//! | `set` | write | Replace the whole sequence |
//! | `append` / `extend` | write | Concatenate another store / elements |
//! | `get` / `get_all` | read | Copy one element / snapshot all |
//! | `pop` | write | Remove the head element |
//! | `replace` | write | Overwrite one element in place |
//! | `enumerate` | read or write | Visit, filter and delete in one pass |
//! | `lock` / `read_lock` | write / read | Manual guard for compound operations |

mod enumerate;
mod guard;
mod sequence;

pub use enumerate::Action;
pub use guard::{StoreReadGuard, StoreWriteGuard};
pub use sequence::Store;
