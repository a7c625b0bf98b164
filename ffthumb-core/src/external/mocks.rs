// ffthumb-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---
// Compiled for this crate's own unit tests, and for integration tests through
// the "test-mocks" feature (enabled by the self dev-dependency).

use super::{ProcessOutput, ProcessRequest, ProcessRunner};
use crate::cancellation::CancellationToken;
use crate::error::{CoreError, CoreResult};

use std::collections::VecDeque;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

/// What a mocked process does when it is "run".
#[derive(Debug, Clone, Default)]
pub struct MockResponse {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Files (name, contents) written into the request's working directory.
    pub files: Vec<(String, Vec<u8>)>,
    /// Block until the token is cancelled, like a hung tool.
    pub hang: bool,
}

#[derive(Debug)]
struct MockExpectation {
    tool: String,
    response: MockResponse,
}

/// Mock implementation of ProcessRunner supporting multiple expectations.
///
/// Expectations are matched first-in first-out by tool name (the program's
/// file stem, e.g. "ffprobe"). A call with no matching expectation panics.
#[derive(Debug, Clone, Default)]
pub struct MockProcessRunner {
    expectations: Arc<Mutex<VecDeque<MockExpectation>>>,
    received_calls: Arc<Mutex<Vec<ProcessRequest>>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(&self, tool: &str, response: MockResponse) {
        lock(&self.expectations).push_back(MockExpectation {
            tool: tool.to_string(),
            response,
        });
    }

    /// ffprobe succeeds and prints `json`.
    pub fn expect_probe_json(&self, json: &str) {
        self.add_expectation(
            "ffprobe",
            MockResponse {
                stdout: json.as_bytes().to_vec(),
                ..Default::default()
            },
        );
    }

    /// ffprobe reports a single square-pixel video stream.
    pub fn expect_square_pixels(&self) {
        self.expect_probe_json(
            r#"{"streams":[{"codec_type":"video","sample_aspect_ratio":"1:1","display_aspect_ratio":"16:9"}]}"#,
        );
    }

    /// ffmpeg succeeds and leaves `1.png`, `2.png`, ... with the given sizes.
    pub fn expect_candidates(&self, sizes: &[usize]) {
        let files: Vec<(String, Vec<u8>)> = sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                let name = format!("{}.png", i + 1);
                let contents: Vec<u8> = (0..*size).map(|b| (b % 251) as u8 ^ (i as u8)).collect();
                (name, contents)
            })
            .collect();
        self.expect_files(files);
    }

    /// ffmpeg succeeds and leaves exactly these files.
    pub fn expect_files(&self, files: Vec<(String, Vec<u8>)>) {
        self.add_expectation(
            "ffmpeg",
            MockResponse {
                files,
                ..Default::default()
            },
        );
    }

    /// `tool` exits with `exit_code`, printing `stderr`.
    pub fn expect_failure(&self, tool: &str, exit_code: i32, stderr: &str) {
        self.add_expectation(
            tool,
            MockResponse {
                exit_code,
                stderr: stderr.as_bytes().to_vec(),
                ..Default::default()
            },
        );
    }

    /// `tool` never finishes on its own.
    pub fn expect_hang(&self, tool: &str) {
        self.add_expectation(
            tool,
            MockResponse {
                hang: true,
                ..Default::default()
            },
        );
    }

    pub fn get_received_calls(&self) -> Vec<ProcessRequest> {
        lock(&self.received_calls).clone()
    }

    pub fn pending_expectations(&self) -> usize {
        lock(&self.expectations).len()
    }
}

impl ProcessRunner for MockProcessRunner {
    fn run(
        &self,
        request: &ProcessRequest,
        cancel: &CancellationToken,
    ) -> CoreResult<ProcessOutput> {
        cancel.check()?;
        lock(&self.received_calls).push(request.clone());

        let tool = request.tool_name();
        let expectation = {
            let mut expectations = lock(&self.expectations);
            let index = expectations.iter().position(|e| e.tool == tool);
            index.and_then(|i| expectations.remove(i))
        };
        let Some(expectation) = expectation else {
            log::error!("MockProcessRunner: No expectation found for {}", request.command_line());
            panic!("MockProcessRunner: No expectation found for {}", request.command_line());
        };
        log::info!("MockProcessRunner: Matched expectation for '{}'", expectation.tool);

        let response = expectation.response;
        if response.hang {
            while !cancel.is_cancelled() {
                thread::sleep(Duration::from_millis(5));
            }
            return Err(CoreError::Cancelled);
        }

        if let Some(dir) = &request.current_dir {
            for (name, contents) in &response.files {
                std::fs::write(dir.join(name), contents)?;
            }
        } else if !response.files.is_empty() {
            log::warn!("MockProcessRunner: request has no working directory, files not written");
        }

        Ok(ProcessOutput {
            status: exit_status(response.exit_code),
            stdout: response.stdout,
            stderr: response.stderr,
        })
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw((code & 0xff) << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}
