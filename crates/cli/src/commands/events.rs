//! Entry points for file-watcher events

use anyhow::Result;
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::config::build_runner;

pub fn modified_command(global: &GlobalArgs, paths: &[String]) -> Result<bool> {
    let runner = build_runner(global)?;
    Ok(runner.run_on_modifications(paths))
}

pub fn added_command(global: &GlobalArgs, paths: &[String]) -> Result<bool> {
    let runner = build_runner(global)?;
    debug!("{} path(s) added", paths.len());
    Ok(runner.run_on_additions(paths))
}

pub fn removed_command(global: &GlobalArgs, paths: &[String]) -> Result<bool> {
    let runner = build_runner(global)?;
    debug!("{} path(s) removed", paths.len());
    runner.run_on_removals(paths);
    Ok(true)
}
