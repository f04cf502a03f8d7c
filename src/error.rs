//! # Store Error Types
//!
//! This module defines the error type shared by the store, the worker pool and
//! the JSON codec. Errors are always returned to the immediate caller; nothing
//! in this crate logs or swallows them, and the store stays usable after any
//! reported error.
//!
//! ## Error Categories
//!
//! | Error Type | When It Occurs | Raised By |
//! |------------|----------------|-----------|
//! | `IndexOutOfRange` | Index outside `[0, len)` | [`Store::replace`](crate::Store::replace) |
//! | `Encoding` | A value failed to serialize or deserialize | codec operations |
//! | `Worker` | A pool worker panicked | [`WorkerPool`](crate::WorkerPool) |
//! | `Io` | Reading or writing a snapshot failed | snapshot and streaming codec |
//! | `Generic` | Anything else | job functions supplied by callers |
//!
//! Errors returned by an enumerate callback are not represented here: the
//! enumerate pass hands back the callback's own error value untouched.

use std::fmt;

/// Error type for store, pool and codec operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An index was outside the live range of the sequence
    ///
    /// Carries the offending index and the length the index was checked
    /// against, so the valid range is `0..len`.
    IndexOutOfRange { index: usize, len: usize },

    /// A value could not be marshaled to or unmarshaled from JSON
    Encoding(String),

    /// A worker in the pool failed outside of its job's own error path
    ///
    /// This is raised when a job panics; the panic payload is captured as
    /// text when it is a string.
    Worker(String),

    /// Filesystem or stream I/O failed
    Io(String),

    /// General store error with custom message
    Generic(String),
}

impl StoreError {
    /// Create a new index out of range error
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        StoreError::IndexOutOfRange { index, len }
    }

    /// Create a new encoding error
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        StoreError::Encoding(msg.into())
    }

    /// Create a new worker error
    pub fn worker<S: Into<String>>(msg: S) -> Self {
        StoreError::Worker(msg.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(msg: S) -> Self {
        StoreError::Io(msg.into())
    }

    /// Create a new generic store error
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        StoreError::Generic(msg.into())
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            StoreError::IndexOutOfRange { .. } => "index_out_of_range",
            StoreError::Encoding(_) => "encoding",
            StoreError::Worker(_) => "worker",
            StoreError::Io(_) => "io",
            StoreError::Generic(_) => "generic",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IndexOutOfRange { index, len } => {
                write!(f, "Illegal index {index}, expected between 0 and {len}")
            }
            StoreError::Encoding(msg) => write!(f, "Encoding error: {msg}"),
            StoreError::Worker(msg) => write!(f, "Worker error: {msg}"),
            StoreError::Io(msg) => write!(f, "IO error: {msg}"),
            StoreError::Generic(msg) => write!(f, "store error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::encoding(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::io(err.to_string())
    }
}

impl From<&str> for StoreError {
    fn from(err: &str) -> Self {
        StoreError::Generic(err.to_string())
    }
}

impl From<String> for StoreError {
    fn from(err: String) -> Self {
        StoreError::Generic(err)
    }
}

/// Convenient Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
