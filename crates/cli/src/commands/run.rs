use anyhow::Result;
use minirun_core::RunOptions;
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::config::build_runner;

pub fn run_command(global: &GlobalArgs, paths: &[String], all: bool) -> Result<bool> {
    let runner = build_runner(global)?;

    let passed = if paths.is_empty() {
        debug!("No paths given, running the whole suite");
        runner.run_all()
    } else {
        runner.run(paths, RunOptions { all })
    };

    Ok(passed)
}
