// ============================================================================
// ffthumb-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates every interaction with external command-line tools.
// Processes are launched through the `ProcessRunner` trait so the pipeline can
// be exercised with `MockProcessRunner` without real binaries installed.
//
// KEY COMPONENTS:
// - ProcessRunner: trait for running a command to completion under cancellation
// - StdProcessRunner: concrete implementation over std::process
// - resolve_tool: locating ffmpeg/ffprobe from explicit paths or PATH
// - ffprobe_executor / ffmpeg_executor: the two tool invocations the pipeline needs

use crate::cancellation::CancellationToken;
use crate::error::{CoreError, CoreResult};

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Candidate extraction with ffmpeg
pub mod ffmpeg_executor;

/// Stream probing with ffprobe
pub mod ffprobe_executor;

/// Scriptable runner for tests
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

/// std::process backed runner
pub mod runner;

pub use ffmpeg_executor::extract_candidates;
pub use ffprobe_executor::{ProbeOutput, ProbeStream, probe_streams};
#[cfg(any(test, feature = "test-mocks"))]
pub use mocks::MockProcessRunner;
pub use runner::StdProcessRunner;

/// Default executable name of the decoder.
pub const FFMPEG_BIN: &str = "ffmpeg";

/// Default executable name of the prober.
pub const FFPROBE_BIN: &str = "ffprobe";

// ============================================================================
// PROCESS EXECUTION ABSTRACTION
// ============================================================================

/// A command to run: program, arguments and optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl ProcessRequest {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Short tool name used in error messages, e.g. "ffprobe".
    pub fn tool_name(&self) -> String {
        self.program
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Arguments as lossy strings, convenient for assertions and logs.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Human readable command line for debug logging.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in self.args_lossy() {
            line.push(' ');
            if arg.contains(' ') {
                line.push_str(&format!("\"{arg}\""));
            } else {
                line.push_str(&arg);
            }
        }
        line
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs external commands to completion.
///
/// Implementations must return `CoreError::Cancelled` (and stop the child)
/// when `cancel` is triggered before the process exits. A non-zero exit is
/// not an error at this level; callers inspect `ProcessOutput::status`.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, request: &ProcessRequest, cancel: &CancellationToken)
    -> CoreResult<ProcessOutput>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(
        &self,
        request: &ProcessRequest,
        cancel: &CancellationToken,
    ) -> CoreResult<ProcessOutput> {
        (**self).run(request, cancel)
    }
}

// ============================================================================
// TOOL RESOLUTION
// ============================================================================

/// Resolves the location of an external tool.
///
/// An explicit path containing a separator is used if it points at an
/// executable file; a bare name (explicit or the default) is searched for on
/// `PATH`. The result is always absolute, because ffmpeg is started from
/// inside its workspace where a relative location would no longer resolve.
/// Returns `CoreError::DependencyNotFound` when nothing usable is found.
pub fn resolve_tool(explicit: Option<&Path>, default_name: &str) -> CoreResult<PathBuf> {
    let wanted = explicit.unwrap_or_else(|| Path::new(default_name));
    let found = if wanted.components().count() > 1 || wanted.is_absolute() {
        is_executable(wanted).then(|| wanted.to_path_buf())
    } else {
        find_on_path(wanted.as_os_str(), env::var_os("PATH").as_deref())
    };

    match found {
        Some(path) => {
            let path = std::path::absolute(&path).map_err(|e| {
                CoreError::PathError(format!(
                    "couldn't get absolute path of '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            log::debug!("Resolved {} to {}", default_name, path.display());
            Ok(path)
        }
        None => {
            log::warn!("Dependency '{}' not found.", wanted.display());
            Err(CoreError::DependencyNotFound(wanted.display().to_string()))
        }
    }
}

/// Searches each directory of a `PATH`-style list for `name`.
pub fn find_on_path(name: &OsStr, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .find_map(|dir| {
            let candidate = dir.join(name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
            if cfg!(windows) && Path::new(name).extension().is_none() {
                let with_exe = candidate.with_extension("exe");
                if is_executable(&with_exe) {
                    return Some(with_exe);
                }
            }
            None
        })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_request_builder_and_command_line() {
        let request = ProcessRequest::new("/usr/bin/ffprobe")
            .args(["-v", "error"])
            .arg("my file.mkv")
            .current_dir("/tmp");
        assert_eq!(request.tool_name(), "ffprobe");
        assert_eq!(request.args_lossy(), vec!["-v", "error", "my file.mkv"]);
        assert_eq!(request.current_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(
            request.command_line(),
            "/usr/bin/ffprobe -v error \"my file.mkv\""
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_find_on_path_only_matches_executables() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let plain = tempfile::tempdir()?;
        let bin = tempfile::tempdir()?;
        fs::write(plain.path().join("ffmpeg"), "not executable")?;
        let tool = bin.path().join("ffmpeg");
        fs::write(&tool, "#!/bin/sh\n")?;
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))?;

        let path_var = env::join_paths([plain.path(), bin.path()])?;
        let found = find_on_path(OsStr::new("ffmpeg"), Some(&path_var));
        assert_eq!(found, Some(tool));
        assert_eq!(find_on_path(OsStr::new("ffprobe"), Some(&path_var)), None);
        assert_eq!(find_on_path(OsStr::new("ffmpeg"), None), None);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_tool_paths_resolve_to_absolute() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        // Relative to the test's working directory, the crate root.
        let bin = tempfile::tempdir_in(".")?;
        let tool = bin.path().join("ffmpeg");
        fs::write(&tool, "#!/bin/sh\n")?;
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))?;
        let dir_name = bin.path().file_name().ok_or("no dir name")?;
        let relative = Path::new(".").join(dir_name).join("ffmpeg");

        let resolved = resolve_tool(Some(&relative), FFMPEG_BIN)?;
        assert!(resolved.is_absolute());
        assert_eq!(resolved, std::path::absolute(&relative)?);
        Ok(())
    }

    #[test]
    fn test_resolve_tool_missing_explicit_path() {
        let missing = Path::new("/surely/not/here/ffmpeg");
        match resolve_tool(Some(missing), FFMPEG_BIN) {
            Err(CoreError::DependencyNotFound(name)) => assert!(name.contains("surely")),
            other => panic!("expected DependencyNotFound, got {other:?}"),
        }
    }
}
