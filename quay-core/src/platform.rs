//! Platform-specific directories.

use std::path::PathBuf;

use crate::constants::APP_NAME;
use crate::error::{QuayError, QuayResult};

/// Per-user configuration directory for the client.
///
/// - Windows: `%APPDATA%/quay`
/// - macOS: `~/Library/Application Support/quay`
/// - Linux: `~/.config/quay`
pub fn config_dir() -> QuayResult<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| QuayError::Configuration("could not determine config directory".into()))?;
    Ok(base.join(APP_NAME))
}

/// Per-user data directory, used for log files.
pub fn data_dir() -> QuayResult<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| QuayError::Configuration("could not determine data directory".into()))?;
    Ok(base.join(APP_NAME))
}
