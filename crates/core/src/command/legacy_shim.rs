//! Installation of the compatibility runner required on minitest < 5
//!
//! The runner script is embedded in the binary and written to the user cache
//! directory on first use, so a relocated `minirun` never points ruby at the
//! build tree.

use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

const OLD_RUNNER: &str = include_str!("../../runners/old_runner.rb");

const OLD_RUNNER_FILE_NAME: &str = "old_runner.rb";

/// Per-version directory the shim is installed into
pub fn legacy_shim_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("minirun")
        .join(env!("CARGO_PKG_VERSION"))
}

pub fn install_legacy_shim() -> Result<PathBuf> {
    install_legacy_shim_in(&legacy_shim_dir())
}

/// Write the embedded shim into `dir` unless an identical copy is already
/// there; returns the path to require.
pub fn install_legacy_shim_in(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(OLD_RUNNER_FILE_NAME);
    if fs::read_to_string(&path).is_ok_and(|existing| existing == OLD_RUNNER) {
        return Ok(path);
    }

    fs::create_dir_all(dir)?;

    // Concurrent runs must never observe a half-written file
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(OLD_RUNNER.as_bytes())?;
    staged.persist(&path).map_err(|e| e.error)?;

    debug!("Installed legacy runner shim at {}", path.display());
    Ok(path)
}
