//! Filepath: src/infra/pool.rs
//! Worker pool and output sink (spec.md §4.12 SUPPLEMENT). A bounded `rayon`
//! thread pool drains file-pair jobs and runs the single-threaded,
//! synchronous core diff per pair (spec.md §5). The output sink is a
//! `Mutex`-guarded writer acquired only for the duration of writing one
//! file's already-rendered report, so lock hold time is bounded by report
//! size rather than diff computation time.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use rayon::ThreadPool;

/// A buffered, mutex-serialized sink shared by every worker. Each worker
/// renders its report into a local buffer first and only takes the lock to
/// hand the finished bytes to the underlying writer.
pub struct OutputSink {
    inner: Mutex<Box<dyn Write + Send>>,
    completed: AtomicUsize,
}

impl OutputSink {
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { inner: Mutex::new(writer), completed: AtomicUsize::new(0) }
    }

    /// Write one job's already-rendered report, then bump the completion
    /// counter. Panics if the lock is poisoned (a prior writer panicked
    /// mid-write), matching the teacher's fail-fast convention for
    /// unrecoverable invariant violations.
    pub fn write_report(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.write_all(bytes)?;
        self.completed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}

/// Build a `rayon` thread pool of size `threads` (or the available
/// parallelism when `None`/`0`), matching the `-j/--threads` CLI flag.
pub fn build_pool(threads: Option<usize>) -> Result<ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads.filter(|&n| n > 0) {
        builder = builder.num_threads(n);
    }
    Ok(builder.build()?)
}

/// Run `job` for every item in `items` on `pool`, collecting results in the
/// order the pool reports them — not necessarily input order, matching
/// spec.md §5 ("across file pairs, emission order is unspecified").
pub fn run_jobs<T, R, F>(pool: &ThreadPool, items: Vec<T>, job: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync,
{
    pool.install(|| {
        use rayon::prelude::*;
        items.into_par_iter().map(job).collect()
    })
}
