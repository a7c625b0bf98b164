//! ffprobe integration for reading per-stream aspect ratio information.
//!
//! Only the three stream entries the aspect inspector needs are requested, in
//! JSON form, and deserialized with serde.

use super::{ProcessRequest, ProcessRunner};
use crate::cancellation::CancellationToken;
use crate::error::{CoreResult, command_failed_error};

use serde::Deserialize;
use std::path::Path;

/// One stream entry as reported by `ffprobe -show_entries stream=...`.
///
/// ffprobe omits entries it cannot determine, so absent fields become empty
/// strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProbeStream {
    #[serde(default)]
    pub codec_type: String,
    #[serde(default)]
    pub sample_aspect_ratio: String,
    #[serde(default)]
    pub display_aspect_ratio: String,
}

impl ProbeStream {
    pub fn is_video(&self) -> bool {
        self.codec_type == "video"
    }
}

/// Top-level ffprobe JSON document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeOutput {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

/// Builds the ffprobe invocation for `input_path`.
pub fn probe_request(ffprobe_path: &Path, input_path: &Path) -> ProcessRequest {
    ProcessRequest::new(ffprobe_path)
        .args(["-v", "error"])
        .args(["-print_format", "json"])
        .args([
            "-show_entries",
            "stream=codec_type,sample_aspect_ratio,display_aspect_ratio",
        ])
        .arg(input_path)
}

/// Parses ffprobe's JSON output.
pub fn parse_probe_output(stdout: &[u8]) -> CoreResult<Vec<ProbeStream>> {
    let probe: ProbeOutput = serde_json::from_slice(stdout)?;
    Ok(probe.streams)
}

/// Runs ffprobe against `input_path` and returns its stream records.
pub fn probe_streams<R: ProcessRunner + ?Sized>(
    runner: &R,
    ffprobe_path: &Path,
    input_path: &Path,
    cancel: &CancellationToken,
) -> CoreResult<Vec<ProbeStream>> {
    let request = probe_request(ffprobe_path, input_path);
    let output = runner.run(&request, cancel)?;
    if !output.status.success() {
        log::error!(
            "ffprobe failed on {}: {}",
            input_path.display(),
            output.stderr_lossy().trim()
        );
        return Err(command_failed_error(
            "ffprobe",
            output.status,
            output.stderr_lossy(),
        ));
    }

    let streams = parse_probe_output(&output.stdout)?;
    log::debug!(
        "ffprobe reported {} stream(s) for {}",
        streams.len(),
        input_path.display()
    );
    Ok(streams)
}
