// ============================================================================
// ffthumb-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ThumbnailerConfig
//
// Fluent construction of ThumbnailerConfig, starting from the defaults in
// config/mod.rs.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::ThumbnailerConfig;

/// Builder for creating ThumbnailerConfig instances.
///
/// # Examples
///
/// ```rust
/// use ffthumb_core::config::ThumbnailerConfigBuilder;
///
/// let config = ThumbnailerConfigBuilder::new().candidates(0).build();
/// assert_eq!(config.effective_candidates(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThumbnailerConfigBuilder {
    config: ThumbnailerConfig,
}

impl ThumbnailerConfigBuilder {
    /// Creates a new builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of candidates to extract.
    pub fn candidates(mut self, candidates: usize) -> Self {
        self.config.candidates = candidates;
        self
    }

    /// Sets an explicit ffmpeg location.
    pub fn ffmpeg_path(mut self, path: PathBuf) -> Self {
        self.config.ffmpeg_path = Some(path);
        self
    }

    /// Sets an explicit ffprobe location.
    pub fn ffprobe_path(mut self, path: PathBuf) -> Self {
        self.config.ffprobe_path = Some(path);
        self
    }

    /// Sets the base directory for scratch workspaces.
    pub fn temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.config.temp_dir = Some(temp_dir);
        self
    }

    /// Builds the ThumbnailerConfig.
    pub fn build(self) -> ThumbnailerConfig {
        self.config
    }
}
