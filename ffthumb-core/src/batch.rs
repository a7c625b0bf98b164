//! Fan-out of the thumbnail pipeline over many input files.
//!
//! A fixed number of worker threads pull paths from a shared queue. Each
//! worker finishes one file before taking the next; a worker whose file fails
//! stops, while the other workers carry on with the remaining queue.

use crate::cancellation::CancellationToken;
use crate::error::CoreResult;
use crate::external::ProcessRunner;
use crate::thumbnailer::{Thumbnailer, default_output_path};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, mpsc};
use std::thread;

/// Counts of what happened to the files of one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Files never started, because their workers stopped or the run was cancelled.
    pub skipped: usize,
}

/// Thumbnails every file in `files`, writing `<file>.png` next to each.
///
/// `on_done` is called from the worker thread as each file finishes, with
/// the output path on success. `workers` below 1 is raised to 1.
pub fn run_batch<R, F>(
    thumbnailer: &Thumbnailer<R>,
    files: &[PathBuf],
    workers: usize,
    cancel: &CancellationToken,
    on_done: F,
) -> BatchSummary
where
    R: ProcessRunner,
    F: Fn(&Path, &CoreResult<PathBuf>) + Sync,
{
    let workers = workers.max(1);
    let (tx, rx) = mpsc::channel::<PathBuf>();
    for file in files {
        // The receiver outlives this loop, so sending cannot fail.
        let _ = tx.send(file.clone());
    }
    drop(tx);

    let queue = Mutex::new(rx);
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    log::debug!("Processing {} file(s) with {} worker(s)", files.len(), workers);

    thread::scope(|scope| {
        for id in 0..workers {
            let queue = &queue;
            let succeeded = &succeeded;
            let failed = &failed;
            let on_done = &on_done;
            scope.spawn(move || {
                loop {
                    if cancel.is_cancelled() {
                        log::debug!("worker {}: cancelled", id);
                        return;
                    }
                    let next = match queue.lock() {
                        Ok(rx) => rx.recv(),
                        Err(poisoned) => poisoned.into_inner().recv(),
                    };
                    let Ok(input) = next else {
                        return;
                    };

                    let output = default_output_path(&input);
                    let result = thumbnailer
                        .thumbnail_to_path(cancel, &input, &output)
                        .map(|_| output);
                    on_done(&input, &result);

                    match result {
                        Ok(_) => {
                            succeeded.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            failed.fetch_add(1, Ordering::Relaxed);
                            if e.is_cancelled() {
                                log::warn!("{}: {}", input.display(), e);
                            } else {
                                log::error!("{}: {}", input.display(), e);
                            }
                            log::debug!("worker {}: stopping after failure", id);
                            return;
                        }
                    }
                }
            });
        }
    });

    let succeeded = succeeded.into_inner();
    let failed = failed.into_inner();
    BatchSummary {
        succeeded,
        failed,
        skipped: files.len().saturating_sub(succeeded + failed),
    }
}
