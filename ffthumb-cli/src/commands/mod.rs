//! Command implementations for the CLI.

/// Thumbnails every file named on the command line.
pub mod thumbnail;
