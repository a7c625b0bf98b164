// ffthumb-cli/src/lib.rs
//
// Library portion of the ffthumb CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::thumbnail::run_thumbnail;
