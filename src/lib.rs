//! # seqstore: Thread-Safe Ordered Store with Parallel JSON Lines Export
//!
//! `seqstore` provides [`Store`], a generic ordered container that many
//! threads can read and write at once, plus a bulk codec that turns a whole
//! store into newline-delimited JSON and back.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use seqstore::prelude::*;
//!
//! let store = Store::new(16);
//! for i in 0..100u32 {
//!     store.add(i);
//! }
//!
//! // Drop every tenth element in a single pass
//! let visited = store.enumerate(
//!     |idx, _| -> StoreResult<Action> {
//!         Ok(if idx % 10 == 0 { Action::Delete } else { Action::Continue })
//!     },
//!     true,
//! )?;
//! assert_eq!(visited, 100);
//! assert_eq!(store.len(), 90);
//!
//! let lines = store.to_json_lines()?;
//! let restored: Store<u32> = Store::default();
//! restored.from_json_lines(&lines)?;
//! assert_eq!(restored.get_all(), store.get_all());
//! # Ok::<(), seqstore::StoreError>(())
//! ```
//!
//! ## 🎯 Core Concepts
//!
//! ### Store - One Sequence, One Lock
//!
//! A [`Store`] is a cheap-to-clone handle on a sequence guarded by a single
//! reader/writer lock. Every method is one atomic critical section. When
//! several steps must happen atomically, take a guard with [`Store::lock`] or
//! [`Store::read_lock`].
//!
//! ### Enumerate - Visit, Filter, Delete
//!
//! [`Store::enumerate`] walks the sequence once and lets a callback keep,
//! delete or stop at each element. Deleted elements are removed by one
//! compaction at the end of the pass.
//!
//! ### Codec - JSON Array and JSON Lines
//!
//! [`Store::to_json`] produces one JSON array. [`Store::to_json_lines`]
//! produces one record per line, marshaling elements in parallel on a
//! [`WorkerPool`]. The [`snapshot`] module writes and reads those lines as
//! files from async code.
//!
//! ## 📚 Module Overview
//!
//! - **[`store`]**: [`Store`], [`Action`] and the manual lock guards
//! - **[`codec`]**: JSON array and JSON lines encoding, [`CodecConfig`]
//! - **[`pool`]**: [`WorkerPool`] for index-addressed parallel jobs
//! - **[`snapshot`]**: async file export/import on tokio
//! - **[`error`]**: [`StoreError`] and [`StoreResult`]
//!
//! ## 🔍 Tracing
//!
//! Enable the `tracing` feature to get `debug!` events and spans around
//! enumerate passes, pool dispatch and bulk encoding. Errors are never
//! logged, only returned.

pub mod codec;
pub mod error;
pub mod pool;
pub mod snapshot;
pub mod store;

#[cfg(test)]
mod tracing_tests;

// Core public API
pub use codec::CodecConfig;
pub use error::{StoreError, StoreResult};
pub use pool::WorkerPool;
pub use snapshot::{load_json_lines, save_json_lines};
pub use store::{Action, Store, StoreReadGuard, StoreWriteGuard};

// Convenience re-exports for common patterns
pub mod prelude {
    //! Simplified imports for common usage patterns
    //!
    //! Use `use seqstore::prelude::*;` to import the most commonly used types.

    pub use crate::{
        Action, CodecConfig, Store, StoreError, StoreResult, WorkerPool, load_json_lines,
        save_json_lines,
    };
}
