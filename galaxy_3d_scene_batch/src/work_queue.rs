/// WorkQueue: fork-join worker pool for per-frame parallel loops.
///
/// Wraps a dedicated rayon thread pool. Every call blocks until all of its
/// work items have completed, so callers can read per-chunk results as soon
/// as it returns. A panicking work item fails the whole call with
/// `Error::WorkerFailed`; no partial results are returned.

use std::panic::{self, AssertUnwindSafe};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use crate::error::Result;
use crate::engine_err;

pub struct WorkQueue {
    pool: ThreadPool,
    num_workers: usize,
}

impl WorkQueue {
    /// Create a pool with `num_workers` worker threads (at least one).
    pub fn new(num_workers: usize) -> Result<Self> {
        let num_workers = num_workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("galaxy3d-worker-{}", i))
            .build()
            .map_err(|e| engine_err!(InitializationFailed, "galaxy3d::WorkQueue",
                "Failed to create worker pool: {}", e))?;

        crate::engine_debug!("galaxy3d::WorkQueue", "Created worker pool with {} threads", num_workers);

        Ok(Self { pool, num_workers })
    }

    /// Number of threads that may run work items: the workers plus the
    /// calling thread. Thread indices passed to work items are below this.
    pub fn num_threads(&self) -> usize {
        self.num_workers + 1
    }

    /// Split `items` into contiguous chunks and process them in parallel.
    ///
    /// Chunks hold at least `min_chunk` items; fewer, larger chunks are used
    /// when there are more items than threads. The closure receives
    /// `(thread_index, offset_of_chunk, chunk)` and the per-chunk results
    /// are returned in chunk order.
    pub fn for_each_parallel<T, R, F>(&self, items: &[T], min_chunk: usize, f: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, usize, &[T]) -> R + Sync,
    {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_size = min_chunk.max(1).max(items.len().div_ceil(self.num_threads()));

        // Single chunk: no need to wake the workers
        if chunk_size >= items.len() {
            return self.guard(|| vec![f(0, 0, items)]);
        }

        self.guard(|| {
            self.pool.install(|| {
                items
                    .par_chunks(chunk_size)
                    .enumerate()
                    .map(|(chunk_index, chunk)| f(Self::thread_index(), chunk_index * chunk_size, chunk))
                    .collect()
            })
        })
    }

    /// Process each item as its own work item. Results are in item order.
    pub fn process_each<T, R, F>(&self, items: &[T], f: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &T) -> R + Sync,
    {
        match items.len() {
            0 => Ok(Vec::new()),
            1 => self.guard(|| vec![f(0, &items[0])]),
            _ => self.guard(|| {
                self.pool.install(|| {
                    items
                        .par_iter()
                        .with_max_len(1)
                        .enumerate()
                        .map(|(i, item)| f(i, item))
                        .collect()
                })
            }),
        }
    }

    /// Worker threads are numbered from 1; the calling thread is 0.
    fn thread_index() -> usize {
        rayon::current_thread_index().map_or(0, |i| i + 1)
    }

    fn guard<R>(&self, work: impl FnOnce() -> R) -> Result<R> {
        panic::catch_unwind(AssertUnwindSafe(work)).map_err(|payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            engine_err!(WorkerFailed, "galaxy3d::WorkQueue", "Work item panicked: {}", reason)
        })
    }
}

#[cfg(test)]
#[path = "work_queue_tests.rs"]
mod tests;
