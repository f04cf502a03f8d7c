//! # Worker Pool
//!
//! A fixed-size pool that runs `count` independent, index-addressed jobs on
//! scoped threads and reports the first failure.
//!
//! Jobs are handed out through a shared cursor, so completion order is
//! arbitrary. Anything that must come back in order goes through
//! [`WorkerPool::map`], which gives every job its own pre-sized output slot
//! instead of appending to a shared sequence.

use crate::error::{StoreError, StoreResult};
use parking_lot::Mutex;
use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Number of workers the machine can run in parallel, at least one
pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Fixed-concurrency executor for index-addressed jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Create a pool running at most `workers` jobs at a time
    ///
    /// A size of zero is treated as one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Maximum number of jobs running at once
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `job(0)`, `job(1)`, ..., `job(count - 1)` in parallel
    ///
    /// Returns once every dispatched job has finished. After the first job
    /// error no further jobs are started and that error is returned. A job
    /// that panics is reported as [`StoreError::Worker`]. Zero jobs succeed
    /// immediately without spawning anything.
    pub fn run<F>(&self, count: usize, job: F) -> StoreResult<()>
    where
        F: Fn(usize) -> StoreResult<()> + Sync,
    {
        if count == 0 {
            return Ok(());
        }

        let threads = self.workers.min(count);
        let cursor = AtomicUsize::new(0);
        let stopped = AtomicBool::new(false);
        let first_error: Mutex<Option<StoreError>> = Mutex::new(None);

        #[cfg(feature = "tracing")]
        debug!(count, threads, "dispatching pool jobs");

        let worker = || {
            while !stopped.load(Ordering::Acquire) {
                let idx = cursor.fetch_add(1, Ordering::Relaxed);
                if idx >= count {
                    break;
                }

                let outcome = panic::catch_unwind(AssertUnwindSafe(|| job(idx)))
                    .unwrap_or_else(|payload| {
                        Err(StoreError::worker(format!(
                            "job {idx} panicked: {}",
                            panic_message(payload.as_ref())
                        )))
                    });

                if let Err(err) = outcome {
                    let mut slot = first_error.lock();
                    if slot.is_none() {
                        *slot = Some(err);
                    }
                    drop(slot);
                    stopped.store(true, Ordering::Release);
                    break;
                }
            }
        };

        if threads == 1 {
            worker();
        } else {
            thread::scope(|s| {
                for _ in 0..threads {
                    s.spawn(&worker);
                }
            });
        }

        match first_error.into_inner() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run `count` jobs and collect their results in index order
    ///
    /// Each job writes only into its own slot, so the output order matches
    /// the index order no matter which worker finishes first.
    pub fn map<R, F>(&self, count: usize, job: F) -> StoreResult<Vec<R>>
    where
        R: Send,
        F: Fn(usize) -> StoreResult<R> + Sync,
    {
        let slots: Vec<Mutex<Option<R>>> = (0..count).map(|_| Mutex::new(None)).collect();

        self.run(count, |idx| {
            let value = job(idx)?;
            *slots[idx].lock() = Some(value);
            Ok(())
        })?;

        slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| {
                slot.into_inner()
                    .ok_or_else(|| StoreError::worker(format!("job {idx} produced no output")))
            })
            .collect()
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(available_workers())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "non-string panic payload"
    }
}
