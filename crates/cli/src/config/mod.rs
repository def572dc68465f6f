//! Loading the configuration the CLI hands to the runner

use anyhow::{Context, Result};
use minirun_core::{Config, Runner};
use minirun_core::services::{DryRunExecutor, FixedVersionProbe};
use std::env;
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::display::{ConsoleMessenger, ConsoleNotifier};

/// Read the configuration file (explicit or discovered) and apply the
/// command-line overrides
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    let path = match &global.config {
        Some(path) => Some(path.clone()),
        None => {
            let start = match &global.directory {
                Some(dir) => dir.clone(),
                None => env::current_dir().context("Failed to get current directory")?,
            };
            Config::find_config_file(&start)
        }
    };

    let config = match path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            Config::load_from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => {
            debug!("No config file found, using defaults");
            Config::default()
        }
    };

    Ok(global.apply(config))
}

/// A runner wired to the console, honoring `--directory`, `--dry-run` and
/// `--minitest-version`
pub fn build_runner(global: &GlobalArgs) -> Result<Runner> {
    let config = load_config(global)?;

    let mut builder = Runner::builder(config)
        .messenger(ConsoleMessenger::new())
        .notifier(ConsoleNotifier);

    if let Some(dir) = &global.directory {
        builder = builder.root(dir);
    }
    if global.dry_run {
        builder = builder.executor(DryRunExecutor);
    }
    if let Some(major) = global.minitest_version {
        builder = builder.version_probe(FixedVersionProbe(major >= 5));
    }

    builder.build().context("Failed to set up the test runner")
}
