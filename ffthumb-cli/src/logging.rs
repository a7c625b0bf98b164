// ============================================================================
// ffthumb-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the CLI
//
// All log output goes to stderr; stdout is reserved for the paths of the
// thumbnails that were written, one per line.
//
// USAGE:
// The level comes from the flags (-v debug, -q error, otherwise info).
// RUST_LOG, when set, is applied on top and wins for the modules it names:
// - RUST_LOG=ffthumb_core=trace: Very verbose output from the core library

use log::LevelFilter;
use std::io::Write;

/// Maps the verbosity flags to a level filter.
pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    }
}

/// Initialises the global logger. Later calls are ignored.
pub fn init(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            let level_str = match record.level() {
                log::Level::Error => "ERROR",
                log::Level::Warn => "WARN ",
                log::Level::Info => "INFO ",
                log::Level::Debug => "DEBUG",
                log::Level::Trace => "TRACE",
            };
            writeln!(buf, "{} {} {}", buf.timestamp(), level_str, record.args())
        })
        .filter_level(level)
        .target(env_logger::Target::Stderr);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized with level: {}", level);
    }
}
