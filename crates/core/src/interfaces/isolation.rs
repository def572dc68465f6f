//! Dependency environment isolation interface

use crate::{command::CommandLine, error::Result};

/// Runs a command with the host's own dependency environment stripped
pub trait EnvironmentIsolation: Send + Sync {
    fn isolate(
        &self,
        command: &CommandLine,
        run: &dyn Fn(&CommandLine) -> Result<bool>,
    ) -> Result<bool>;
}
