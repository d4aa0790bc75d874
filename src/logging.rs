//! Log subscriber setup.
//!
//! The editor owns the terminal, so log output goes to a file. Nothing is
//! installed when no log path is configured.

use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use crate::error::{Error, Result};

/// Install a file-backed `tracing` subscriber at the given level.
///
/// Returns `Ok(false)` when a global subscriber was already installed.
pub fn init_file_logging(path: &Path, level: Level) -> Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(|e| Error::io(e, parent.to_path_buf()))?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(e, path.to_path_buf()))?;

    let installed = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .is_ok();
    Ok(installed)
}

/// Install a stderr subscriber for command-line tools.
pub fn init_stderr_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .try_init();
}
