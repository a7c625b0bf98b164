// ffthumb-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use ffthumb_core::config::{DEFAULT_CANDIDATES, MIN_CANDIDATES};
use std::path::PathBuf;

/// Number of workers when `-w` is not given.
pub const DEFAULT_WORKERS: i64 = 1;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "ffthumb",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "ffthumb: pick an interesting thumbnail for each video",
    long_about = "Extracts several key frames from each video with ffmpeg and keeps the \
                  largest PNG as the thumbnail, written next to the video as <file>.png.",
    override_usage = "ffthumb [FLAGS] <paths to video files>"
)]
pub struct Cli {
    /// Number of thumbnails to generate and select from
    #[arg(
        short = 'n',
        long,
        value_name = "COUNT",
        default_value_t = DEFAULT_CANDIDATES as i64,
        allow_negative_numbers = true
    )]
    pub candidates: i64,

    /// Number of workers processing files in parallel
    #[arg(
        short = 'w',
        long,
        value_name = "COUNT",
        default_value_t = DEFAULT_WORKERS,
        allow_negative_numbers = true
    )]
    pub workers: i64,

    /// ffmpeg to run (default: `ffmpeg` from PATH)
    #[arg(long, value_name = "PATH", env = "FFTHUMB_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe to run (default: `ffprobe` from PATH)
    #[arg(long, value_name = "PATH", env = "FFTHUMB_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Directory for scratch workspaces (default: system temp dir)
    #[arg(long, value_name = "DIR", env = "FFTHUMB_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Enable detailed logging output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Video files to thumbnail
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Candidate count with anything below one raised to one.
    pub fn candidate_count(&self) -> usize {
        clamp_count(self.candidates, MIN_CANDIDATES)
    }

    /// Worker count with anything below one raised to one.
    pub fn worker_count(&self) -> usize {
        clamp_count(self.workers, 1)
    }
}

fn clamp_count(value: i64, min: usize) -> usize {
    usize::try_from(value).unwrap_or(0).max(min)
}
