// ============================================================================
// ffthumb-core/src/thumbnailer.rs
// ============================================================================
//
// THUMBNAILER: Pipeline Orchestration
//
// Runs the stages for one video in order:
//   probe aspect ratio -> extract candidates -> select largest -> write output
//
// The scratch workspace is a TempDir owned by the invocation, so it is removed
// whichever stage fails, including when the run is cancelled.

use crate::cancellation::CancellationToken;
use crate::config::ThumbnailerConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{
    FFMPEG_BIN, FFPROBE_BIN, ProcessRunner, StdProcessRunner, extract_candidates, resolve_tool,
};
use crate::processing::{derive_aspect_filter, select_largest, write_selected};
use crate::temp_files::create_workspace;

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Extension appended to an input path to form its default output path.
pub const OUTPUT_SUFFIX: &str = ".png";

/// Chooses a thumbnail for a video by extracting several key frames and
/// keeping the largest PNG.
///
/// The largest, least compressible frame is likely to contain something
/// interesting to look at. Output has the same dimensions as the video
/// (after aspect correction for anamorphic sources).
#[derive(Debug, Clone)]
pub struct Thumbnailer<R: ProcessRunner = StdProcessRunner> {
    runner: R,
    ffmpeg_path: PathBuf,
    ffprobe_path: PathBuf,
    candidates: usize,
    temp_dir: Option<PathBuf>,
}

impl Thumbnailer<StdProcessRunner> {
    /// Creates a thumbnailer that runs the real tools, resolving them first.
    pub fn new(config: &ThumbnailerConfig) -> CoreResult<Self> {
        Self::with_runner(config, StdProcessRunner::new())
    }
}

impl<R: ProcessRunner> Thumbnailer<R> {
    /// Resolves ffmpeg and ffprobe from `config` (or `PATH`) and uses `runner`
    /// to execute them.
    pub fn with_runner(config: &ThumbnailerConfig, runner: R) -> CoreResult<Self> {
        let ffmpeg_path = resolve_tool(config.ffmpeg_path.as_deref(), FFMPEG_BIN)?;
        let ffprobe_path = resolve_tool(config.ffprobe_path.as_deref(), FFPROBE_BIN)?;
        Self::with_tools(config, runner, ffmpeg_path, ffprobe_path)
    }

    /// Uses already resolved tool locations. They must be non-empty.
    pub fn with_tools(
        config: &ThumbnailerConfig,
        runner: R,
        ffmpeg_path: PathBuf,
        ffprobe_path: PathBuf,
    ) -> CoreResult<Self> {
        if ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffmpeg location is empty".to_string()));
        }
        if ffprobe_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffprobe location is empty".to_string()));
        }
        Ok(Self {
            runner,
            ffmpeg_path,
            ffprobe_path,
            candidates: config.effective_candidates(),
            temp_dir: config.temp_dir.clone(),
        })
    }

    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }

    pub fn ffprobe_path(&self) -> &Path {
        &self.ffprobe_path
    }

    pub fn candidates(&self) -> usize {
        self.candidates
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Writes a PNG thumbnail of `input_path` to `output`.
    ///
    /// Returns the number of bytes written. Either the whole selected image
    /// reaches `output` or an error is returned; on cancellation the error is
    /// `CoreError::Cancelled`.
    pub fn write_thumbnail(
        &self,
        cancel: &CancellationToken,
        output: &mut dyn Write,
        input_path: &Path,
    ) -> CoreResult<u64> {
        cancel.check()?;
        let input_path = std::path::absolute(input_path).map_err(|e| {
            CoreError::PathError(format!(
                "couldn't get absolute path of input file '{}': {}",
                input_path.display(),
                e
            ))
        })?;
        log::info!("Choosing thumbnail for {}", input_path.display());

        let filter = derive_aspect_filter(&self.runner, &self.ffprobe_path, &input_path, cancel)?;
        cancel.check()?;

        let workspace = create_workspace(self.temp_dir.as_deref())?;
        let written = self.extract_select_write(cancel, output, &input_path, filter.as_deref(), workspace.path())?;

        let workspace_path = workspace.path().to_path_buf();
        workspace.close().map_err(|e| {
            log::warn!("Couldn't remove workspace {}: {}", workspace_path.display(), e);
            CoreError::Workspace(e)
        })?;

        log::info!("Thumbnail for {} written ({} bytes)", input_path.display(), written);
        Ok(written)
    }

    fn extract_select_write(
        &self,
        cancel: &CancellationToken,
        output: &mut dyn Write,
        input_path: &Path,
        filter: Option<&str>,
        workspace: &Path,
    ) -> CoreResult<u64> {
        extract_candidates(
            &self.runner,
            &self.ffmpeg_path,
            input_path,
            self.candidates,
            filter,
            workspace,
            cancel,
        )?;
        cancel.check()?;

        let selected = select_largest(workspace)?;
        write_selected(&selected, output, cancel)
    }

    /// Writes the thumbnail of `input_path` into a new file at `output_path`.
    ///
    /// The file is created up front and removed again if the pipeline fails,
    /// so no empty or partial image is left behind.
    pub fn thumbnail_to_path(
        &self,
        cancel: &CancellationToken,
        input_path: &Path,
        output_path: &Path,
    ) -> CoreResult<u64> {
        let mut file = File::create(output_path).map_err(|e| {
            CoreError::PathError(format!(
                "couldn't create output file '{}': {}",
                output_path.display(),
                e
            ))
        })?;

        let result = self.write_thumbnail(cancel, &mut file, input_path);
        drop(file);

        if result.is_err() {
            if let Err(e) = fs::remove_file(output_path) {
                log::warn!("Couldn't remove partial output {}: {}", output_path.display(), e);
            }
        }
        result
    }
}

/// Returns `<input_path>.png`, the CLI's output location for an input.
pub fn default_output_path(input_path: &Path) -> PathBuf {
    let mut name: OsString = input_path.as_os_str().to_os_string();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}
