//! PoW generation (multi-threaded CPU).
//!
//! Every search starts its own pool of `W` workers and tears it down before
//! returning. Worker `i` tries nonces `i, i + W, i + 2W, ...` and reports
//! every nonce that clears the threshold over a rendezvous channel. The first
//! report wins; the rest are drained and discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, SyncSender};
use std::time::Instant;

use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use tracing::debug;

use crate::{WorkError, WorkNonce};

/// Batch size per thread before checking the cancellation flag.
const BATCH_SIZE: u64 = 4096;

/// Work hashes are 8 bytes.
const WORK_HASH_LEN: usize = 8;

/// Generates proof-of-work using a fixed number of CPU workers.
#[derive(Clone, Copy, Debug)]
pub struct WorkGenerator {
    workers: usize,
}

impl WorkGenerator {
    /// One worker per logical processor.
    pub fn new() -> Self {
        Self::with_workers(0)
    }

    /// `0` means one worker per logical processor.
    pub fn with_workers(workers: usize) -> Self {
        let workers = if workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            workers
        };
        Self { workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Search for a nonce whose work value over `subject` is at least
    /// `threshold`. Blocks the calling thread until one is found.
    ///
    /// A hasher failure in any worker aborts the whole search.
    pub fn generate(&self, subject: &[u8; 32], threshold: u64) -> Result<WorkNonce, WorkError> {
        self.generate_with(subject, threshold, |_| {
            Blake2bVar::new(WORK_HASH_LEN).map_err(|e| WorkError::Hasher(e.to_string()))
        })
    }

    /// `new_hasher` builds worker `i`'s hasher.
    fn generate_with<H>(
        &self,
        subject: &[u8; 32],
        threshold: u64,
        new_hasher: H,
    ) -> Result<WorkNonce, WorkError>
    where
        H: Fn(usize) -> Result<Blake2bVar, WorkError> + Sync,
    {
        if threshold == 0 {
            return Ok(WorkNonce(0));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("atto-work-{i}"))
            .build()
            .map_err(|e| WorkError::WorkerPool(e.to_string()))?;

        debug!(workers = self.workers, threshold = format_args!("{threshold:016x}"), "work search started");
        let started = Instant::now();

        let cancel = AtomicBool::new(false);
        let (results, found) = mpsc::sync_channel::<Result<u64, WorkError>>(0);
        let stride = self.workers as u64;

        let first = pool.in_place_scope(|scope| {
            for worker in 0..self.workers {
                let results = results.clone();
                let cancel = &cancel;
                let new_hasher = &new_hasher;
                scope.spawn(move |_| match new_hasher(worker) {
                    Ok(template) => {
                        search(template, subject, threshold, worker as u64, stride, cancel, results)
                    }
                    Err(e) => {
                        let _ = results.send(Err(e));
                    }
                });
            }
            drop(results);

            let first = found.recv();
            cancel.store(true, Ordering::Relaxed);
            // Unblock any worker that found a nonce at the same time.
            while found.try_recv().is_ok() {}
            drop(found);
            first
        });

        let nonce = first.map_err(|_| WorkError::Cancelled)??;
        debug!(
            nonce = format_args!("{nonce:016x}"),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "work search finished"
        );
        Ok(WorkNonce(nonce))
    }
}

impl Default for WorkGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// One worker's share of the nonce space.
fn search(
    template: Blake2bVar,
    subject: &[u8; 32],
    threshold: u64,
    start: u64,
    stride: u64,
    cancel: &AtomicBool,
    results: SyncSender<Result<u64, WorkError>>,
) {
    let mut nonce = start;
    let mut out = [0u8; WORK_HASH_LEN];
    while !cancel.load(Ordering::Relaxed) {
        for _ in 0..BATCH_SIZE {
            let mut hasher = template.clone();
            hasher.update(&nonce.to_le_bytes());
            hasher.update(subject);
            if let Err(e) = hasher.finalize_variable(&mut out) {
                let _ = results.send(Err(WorkError::Hasher(e.to_string())));
                return;
            }
            if u64::from_le_bytes(out) >= threshold && results.send(Ok(nonce)).is_err() {
                // The search is over and the receiver is gone.
                return;
            }
            nonce = nonce.wrapping_add(stride);
        }
    }
}
