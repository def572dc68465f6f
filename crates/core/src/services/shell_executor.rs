//! Process execution through the platform shell

use crate::{
    command::CommandLine,
    error::{Error, Result},
    interfaces::ProcessExecutor,
};
use std::process::Command;
use tracing::debug;

/// Runs the joined command line with `sh -c` (`cmd /C` on Windows),
/// inheriting stdio so the test output reaches the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessExecutor for ShellExecutor {
    fn execute(&self, command: &CommandLine) -> Result<bool> {
        if command.is_empty() {
            return Err(Error::ExecutionError("No command specified".to_string()));
        }

        let shell_cmd = command.to_shell_command();
        let mut cmd = shell_command(&shell_cmd);

        if let Some(ref dir) = command.working_dir {
            cmd.current_dir(dir);
        }
        for key in &command.env_remove {
            cmd.env_remove(key);
        }
        for (key, value) in &command.env {
            debug!("Setting env: {}={}", key, value);
            cmd.env(key, value);
        }

        debug!("Executing: {}", shell_cmd);
        let status = cmd
            .status()
            .map_err(|e| Error::ExecutionError(format!("Failed to execute `{shell_cmd}`: {e}")))?;
        debug!("`{}` exited with {}", shell_cmd, status);

        Ok(status.success())
    }
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", line]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", line]);
    cmd
}

/// Prints the command instead of running it and reports success
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunExecutor;

impl ProcessExecutor for DryRunExecutor {
    fn execute(&self, command: &CommandLine) -> Result<bool> {
        println!("{}", command.to_shell_command());
        if let Some(ref dir) = command.working_dir {
            println!("Working directory: {}", dir);
        }
        if !command.env_remove.is_empty() {
            println!("Unset environment variables: {}", command.env_remove.join(", "));
        }
        if !command.env.is_empty() {
            println!("Environment variables:");
            for (key, value) in &command.env {
                println!("  {}={}", key, value);
            }
        }
        Ok(true)
    }
}
