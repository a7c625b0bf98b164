//! Process runner backed by `std::process::Command`.
//!
//! Output pipes are drained on helper threads so a chatty tool can never block
//! on a full pipe, while the calling thread polls the child for exit and the
//! cancellation token for an abort request.

use super::{ProcessOutput, ProcessRequest, ProcessRunner};
use crate::cancellation::CancellationToken;
use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default interval between exit/cancellation checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Runs requests as real child processes.
#[derive(Debug, Clone)]
pub struct StdProcessRunner {
    poll_interval: Duration,
}

impl Default for StdProcessRunner {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl StdProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides how often a running child is checked for exit or cancellation.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl ProcessRunner for StdProcessRunner {
    fn run(
        &self,
        request: &ProcessRequest,
        cancel: &CancellationToken,
    ) -> CoreResult<ProcessOutput> {
        cancel.check()?;

        let tool = request.tool_name();
        log::debug!("Running: {}", request.command_line());

        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &request.current_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| {
            log::error!("Failed to spawn {}: {}", tool, e);
            command_start_error(tool.clone(), e)
        })?;

        let stdout_handle = drain(child.stdout.take());
        let stderr_handle = drain(child.stderr.take());

        let status = loop {
            if cancel.is_cancelled() {
                log::warn!("Cancelling {} (pid {})", tool, child.id());
                stop(&mut child);
                // Grandchildren of a wrapper script may still hold the pipes
                // open, so the reader threads are detached rather than joined.
                drop(stdout_handle);
                drop(stderr_handle);
                return Err(CoreError::Cancelled);
            }
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => thread::sleep(self.poll_interval),
                Err(e) => {
                    stop(&mut child);
                    return Err(command_wait_error(tool, e));
                }
            }
        };

        // A terminal Ctrl-C reaches the child too, which may exit with an
        // error before the token is set.
        if exited_by_cancellation(&status, cancel) {
            log::warn!("{} exited with {} after cancellation", tool, status);
            drop(stdout_handle);
            drop(stderr_handle);
            return Err(CoreError::Cancelled);
        }

        let output = ProcessOutput {
            status,
            stdout: join(stdout_handle),
            stderr: join(stderr_handle),
        };
        log::debug!("{} exited with {}", tool, output.status);
        Ok(output)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            if let Err(e) = pipe.read_to_end(&mut buf) {
                log::debug!("Error reading child output: {}", e);
            }
            buf
        })
    })
}

fn join(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

fn exited_by_cancellation(status: &ExitStatus, cancel: &CancellationToken) -> bool {
    !status.success() && cancel.is_cancelled()
}

fn stop(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::debug!("kill failed (process may have exited): {}", e);
    }
    // Reap so no zombie is left behind.
    let _ = child.wait();
}
