//! Implementation of the thumbnail run.
//!
//! Builds the core configuration from the flags, wires Ctrl-C to the
//! cancellation token, and fans the files out over the worker pool.

use crate::cli::Cli;

use anyhow::Context;
use ffthumb_core::{
    BatchSummary, CancellationToken, Thumbnailer, ThumbnailerConfig, ThumbnailerConfigBuilder,
    run_batch,
};

use std::io::{self, Write};
use std::path::Path;

use log::{debug, info, warn};

/// Maps the command-line flags onto the core configuration.
pub fn config_from_cli(cli: &Cli) -> ThumbnailerConfig {
    let mut builder = ThumbnailerConfigBuilder::new().candidates(cli.candidate_count());
    if let Some(path) = &cli.ffmpeg {
        builder = builder.ffmpeg_path(path.clone());
    }
    if let Some(path) = &cli.ffprobe {
        builder = builder.ffprobe_path(path.clone());
    }
    if let Some(dir) = &cli.temp_dir {
        builder = builder.temp_dir(dir.clone());
    }
    builder.build()
}

/// Cancels `cancel` on the first SIGINT.
fn install_interrupt_handler(cancel: &CancellationToken) -> anyhow::Result<()> {
    let cancel = cancel.clone();
    ctrlc::set_handler(move || {
        if !cancel.is_cancelled() {
            warn!("Interrupted, cancelling remaining work");
        }
        cancel.cancel();
    })
    .context("couldn't install the interrupt handler")
}

fn print_output(output: &Path) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = writeln!(out, "{}", output.display()).and_then(|_| out.flush()) {
        warn!("Couldn't print {}: {}", output.display(), e);
    }
}

/// Thumbnails every file in `cli.files`, printing each written path to stdout.
pub fn run_thumbnail(cli: &Cli) -> anyhow::Result<BatchSummary> {
    let config = config_from_cli(cli);
    debug!("Configuration: {:?}", config);

    let thumbnailer = Thumbnailer::new(&config).context("couldn't locate ffmpeg and ffprobe")?;
    debug!(
        "Using ffmpeg at {} and ffprobe at {}",
        thumbnailer.ffmpeg_path().display(),
        thumbnailer.ffprobe_path().display()
    );

    let cancel = CancellationToken::new();
    install_interrupt_handler(&cancel)?;

    let summary = run_batch(
        &thumbnailer,
        &cli.files,
        cli.worker_count(),
        &cancel,
        |_, result| {
            if let Ok(output) = result {
                print_output(output);
            }
        },
    );

    info!(
        "Finished: {} succeeded, {} failed, {} skipped",
        summary.succeeded, summary.failed, summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_config_from_defaults() {
        let cli = Cli::try_parse_from(["ffthumb", "a.mkv"]).unwrap();
        let config = config_from_cli(&cli);
        assert_eq!(config.candidates, 5);
        assert_eq!(config.ffmpeg_path, None);
        assert_eq!(config.ffprobe_path, None);
        assert_eq!(config.temp_dir, None);
    }

    #[test]
    fn test_config_from_flags() {
        let cli = Cli::try_parse_from([
            "ffthumb",
            "-n",
            "-2",
            "--ffmpeg",
            "/opt/ff/ffmpeg",
            "--ffprobe",
            "/opt/ff/ffprobe",
            "--temp-dir",
            "/scratch",
            "a.mkv",
        ])
        .unwrap();
        let config = config_from_cli(&cli);
        assert_eq!(config.candidates, 1);
        assert_eq!(config.ffmpeg_path, Some(PathBuf::from("/opt/ff/ffmpeg")));
        assert_eq!(config.ffprobe_path, Some(PathBuf::from("/opt/ff/ffprobe")));
        assert_eq!(config.temp_dir, Some(PathBuf::from("/scratch")));
    }
}
