// ============================================================================
// ffthumb-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Key-Frame Candidate Extraction
//
// Builds and runs the single ffmpeg invocation of the pipeline: decode only
// key frames, write the first `count` of them as numbered PNG files into the
// workspace directory, optionally through an aspect-correcting filter.

use super::{ProcessRequest, ProcessRunner};
use crate::cancellation::CancellationToken;
use crate::error::{CoreError, CoreResult, command_failed_error};

use std::path::Path;

/// ffmpeg's numeric "error" log level: errors only, no banner or stats.
pub const FFMPEG_LOG_LEVEL: &str = "16";

/// Output pattern for candidates, relative to the workspace.
pub const CANDIDATE_PATTERN: &str = "%d.png";

/// Builds the ffmpeg invocation writing candidates into `workspace`.
pub fn extract_request(
    ffmpeg_path: &Path,
    input_path: &Path,
    count: usize,
    filter: Option<&str>,
    workspace: &Path,
) -> ProcessRequest {
    let mut request = ProcessRequest::new(ffmpeg_path)
        .args(["-loglevel", FFMPEG_LOG_LEVEL])
        .args(["-skip_frame", "nokey"])
        .arg("-i")
        .arg(input_path);

    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
        request = request.args(["-vf", filter]);
    }

    request
        .arg("-frames:v")
        .arg(count.to_string())
        .args(["-vsync", "vfr"])
        .arg("-y")
        .arg(CANDIDATE_PATTERN)
        .current_dir(workspace)
}

/// Extracts up to `count` key-frame candidates into `workspace`.
///
/// `input_path` must be absolute because ffmpeg runs with `workspace` as its
/// working directory. `count` below 1 is raised to 1.
pub fn extract_candidates<R: ProcessRunner + ?Sized>(
    runner: &R,
    ffmpeg_path: &Path,
    input_path: &Path,
    count: usize,
    filter: Option<&str>,
    workspace: &Path,
    cancel: &CancellationToken,
) -> CoreResult<()> {
    if !input_path.is_absolute() {
        return Err(CoreError::PathError(format!(
            "input path must be absolute: {}",
            input_path.display()
        )));
    }

    let count = count.max(1);
    let request = extract_request(ffmpeg_path, input_path, count, filter, workspace);
    log::debug!(
        "Extracting {} candidate(s) from {} into {}",
        count,
        input_path.display(),
        workspace.display()
    );

    let output = runner.run(&request, cancel)?;
    if !output.status.success() {
        log::error!(
            "ffmpeg candidate extraction failed for {}: {}",
            input_path.display(),
            output.stderr_lossy().trim()
        );
        return Err(command_failed_error(
            "ffmpeg",
            output.status,
            output.stderr_lossy(),
        ));
    }
    Ok(())
}
