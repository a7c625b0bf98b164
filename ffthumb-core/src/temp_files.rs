//! Scratch workspace management.
//!
//! Each pipeline invocation extracts its candidates into its own uniquely
//! named directory. The returned `TempDir` removes the directory and all of
//! its contents when dropped, so every exit path cleans up.

use crate::error::{CoreError, CoreResult};

use std::path::Path;
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Prefix of every workspace directory name.
pub const WORKSPACE_PREFIX: &str = "ffthumb-";

/// Creates a fresh workspace under `base`, or the system temp dir if `None`.
pub fn create_workspace(base: Option<&Path>) -> CoreResult<TempDir> {
    let mut builder = TempFileBuilder::new();
    builder.prefix(WORKSPACE_PREFIX);

    let dir = match base {
        Some(base) => {
            std::fs::create_dir_all(base).map_err(CoreError::Workspace)?;
            builder.tempdir_in(base)
        }
        None => builder.tempdir(),
    }
    .map_err(CoreError::Workspace)?;

    log::debug!("Created workspace {}", dir.path().display());
    Ok(dir)
}
