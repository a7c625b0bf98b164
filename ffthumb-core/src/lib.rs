//! Core library for choosing an "interesting" thumbnail frame from a video.
//!
//! ffmpeg extracts a handful of key frames as PNG images; the largest image,
//! being the least compressible, is taken as the frame most likely to show
//! something worth looking at. Anamorphic sources are detected with ffprobe
//! and rescaled to square pixels.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use ffthumb_core::{CancellationToken, Thumbnailer, ThumbnailerConfig};
//! use std::fs::File;
//! use std::path::Path;
//!
//! let thumbnailer = Thumbnailer::new(&ThumbnailerConfig::default()).unwrap();
//! let mut output = File::create("clip.mkv.png").unwrap();
//! thumbnailer
//!     .write_thumbnail(&CancellationToken::new(), &mut output, Path::new("clip.mkv"))
//!     .unwrap();
//! ```

pub mod batch;
pub mod cancellation;
pub mod config;
pub mod error;
pub mod external;
pub mod processing;
pub mod temp_files;
pub mod thumbnailer;

// Re-exports for public API
pub use batch::{BatchSummary, run_batch};
pub use cancellation::CancellationToken;
pub use config::{ThumbnailerConfig, ThumbnailerConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use external::{ProcessOutput, ProcessRequest, ProcessRunner, StdProcessRunner, resolve_tool};
pub use temp_files::create_workspace;
pub use thumbnailer::{Thumbnailer, default_output_path};
