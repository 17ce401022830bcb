//! Bounded worker pool for concurrent request dispatch.
//!
//! Submit N independent units of work, run at most `size` of them at once,
//! and collect the outputs in completion order (not submission order).

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

/// Errors raised by the pool itself, as opposed to errors inside the work.
#[derive(Debug, Error)]
pub enum PoolError {
    /// A unit of work panicked or was cancelled.
    #[error("worker task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

/// A fixed number of concurrent execution slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    size: usize,
}

impl WorkerPool {
    /// Creates a pool with `size` slots. A size of 0 is treated as 1.
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    /// Number of slots.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Runs `work` for every item and waits for all of them.
    ///
    /// Each unit runs on its own tokio task and holds a slot for its whole
    /// duration. Outputs are returned in the order the units finished. If a
    /// unit panics, the remaining units are aborted and the panic is reported
    /// as `PoolError::TaskFailed`.
    pub async fn dispatch<I, F, Fut, T>(&self, items: I, work: F) -> Result<Vec<T>, PoolError>
    where
        I: IntoIterator,
        F: Fn(I::Item) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let slots = Arc::new(Semaphore::new(self.size));
        let mut tasks = JoinSet::new();

        for item in items {
            let slots = Arc::clone(&slots);
            let unit = work(item);
            tasks.spawn(async move {
                // The semaphore lives only for this call and is never closed.
                let _slot = slots
                    .acquire_owned()
                    .await
                    .expect("pool semaphore is never closed");
                unit.await
            });
        }

        log::debug!("dispatched {} units on {} slots", tasks.len(), self.size);

        let mut outputs = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            outputs.push(joined?);
        }
        Ok(outputs)
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(10)
    }
}
