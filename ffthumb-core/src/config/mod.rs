//! Configuration structures and constants for the ffthumb-core library.
//!
//! This module provides the configuration for a [`crate::Thumbnailer`]: how
//! many candidates to extract, where the external tools live and where
//! scratch workspaces are created.

mod builder;

use std::path::PathBuf;

pub use builder::ThumbnailerConfigBuilder;

// Default constants

/// Default number of key-frame candidates extracted per video.
pub const DEFAULT_CANDIDATES: usize = 5;

/// Minimum number of candidates; lower requests are raised to this.
pub const MIN_CANDIDATES: usize = 1;

/// Main configuration structure for the thumbnail pipeline.
///
/// Tool paths left as `None` are looked up on `PATH` as `ffmpeg` and
/// `ffprobe` when the thumbnailer is created.
///
/// # Examples
///
/// ```rust
/// use ffthumb_core::config::ThumbnailerConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = ThumbnailerConfigBuilder::new()
///     .candidates(8)
///     .ffmpeg_path(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
///     .temp_dir(PathBuf::from("/var/tmp"))
///     .build();
/// assert_eq!(config.effective_candidates(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailerConfig {
    /// Number of key-frame candidates to extract and choose from
    pub candidates: usize,

    /// Explicit ffmpeg location (default: `ffmpeg` from `PATH`)
    pub ffmpeg_path: Option<PathBuf>,

    /// Explicit ffprobe location (default: `ffprobe` from `PATH`)
    pub ffprobe_path: Option<PathBuf>,

    /// Optional base directory for scratch workspaces (default: system temp dir)
    pub temp_dir: Option<PathBuf>,
}

impl Default for ThumbnailerConfig {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES,
            ffmpeg_path: None,
            ffprobe_path: None,
            temp_dir: None,
        }
    }
}

impl ThumbnailerConfig {
    pub fn new(candidates: usize) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    /// Candidate count actually used, never below [`MIN_CANDIDATES`].
    pub fn effective_candidates(&self) -> usize {
        self.candidates.max(MIN_CANDIDATES)
    }
}
