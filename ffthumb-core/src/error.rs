// ============================================================================
// ffthumb-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types and Constructors
//
// Every fallible operation in the crate returns `CoreResult<T>`. The variants
// are grouped by the stage of the pipeline that produces them so callers can
// tell a configuration problem from a tool failure, an empty candidate set or
// a cancelled run.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors produced by the thumbnail pipeline.
#[derive(Error, Debug)]
pub enum CoreError {
    // ---- Configuration ----
    #[error("Required external tool '{0}' not found")]
    DependencyNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // ---- External processes ----
    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed while waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("{cmd} exited with {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to parse ffprobe output: {0}")]
    ProbeParse(#[from] serde_json::Error),

    // ---- I/O ----
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Couldn't create temporary workspace: {0}")]
    Workspace(#[source] io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Couldn't read candidates in {}: {source}", path.display())]
    CandidateScan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Couldn't open thumbnail {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Couldn't write to output: {0}")]
    OutputWrite(#[source] io::Error),

    // ---- Selection ----
    #[error("Could not select a thumbnail: no candidates in {}", .0.display())]
    NoCandidateSelected(PathBuf),

    // ---- Cancellation ----
    #[error("Operation cancelled")]
    Cancelled,
}

impl CoreError {
    /// Returns true when the error reports an aborted run rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CoreError::Cancelled)
    }
}

/// Result type alias for ffthumb-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

// ---- Constructors ----

pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds a `CommandFailed` error, trimming the captured diagnostic text.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl AsRef<str>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.as_ref().trim().to_string(),
    }
}
