//! Process execution interface

use crate::{command::CommandLine, error::Result};

/// Runs a command synchronously and reports whether it succeeded.
///
/// `Err` means the command could not be started at all; a command that ran
/// and failed is `Ok(false)`.
pub trait ProcessExecutor: Send + Sync {
    fn execute(&self, command: &CommandLine) -> Result<bool>;
}
