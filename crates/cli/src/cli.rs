use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use minirun_core::{BackendSwitch, Config};
use std::path::PathBuf;

use crate::commands::{
    added_command, init_command, modified_command, removed_command, run_command, show_command,
};

#[derive(Parser, Debug)]
#[command(name = "minirun")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand; they override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (defaults to the nearest .minirun.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project directory to discover tests and run commands in
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Print the command without executing it
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Re-run the whole suite after a passing partial run
    #[arg(long, global = true)]
    pub all_after_pass: bool,

    /// Wrap the command in `bundle exec`
    #[arg(long, global = true, conflicts_with = "no_bundler")]
    pub bundler: bool,

    /// Never wrap the command in `bundle exec`
    #[arg(long, global = true)]
    pub no_bundler: bool,

    /// Require rubygems explicitly
    #[arg(long, global = true)]
    pub rubygems: bool,

    /// Run through testdrb
    #[arg(long, global = true)]
    pub drb: bool,

    /// Run through zeus, optionally `--zeus=CMD` (default sub-command: test)
    #[arg(long, global = true, value_name = "CMD", num_args = 0..=1, require_equals = true)]
    pub zeus: Option<Option<String>>,

    /// Run through spring, optionally `--spring=CMD` (default sub-command: testunit)
    #[arg(long, global = true, value_name = "CMD", num_args = 0..=1, require_equals = true)]
    pub spring: Option<Option<String>>,

    /// Extra library directory (repeatable)
    #[arg(short = 'I', long = "include", global = true, value_name = "DIR")]
    pub include: Vec<String>,

    /// Test folder, replacing the configured ones (repeatable)
    #[arg(long = "test-folder", global = true, value_name = "DIR")]
    pub test_folders: Vec<String>,

    /// Argument forwarded to the test process (repeatable)
    #[arg(long = "cli", global = true, value_name = "ARG", allow_hyphen_values = true)]
    pub cli: Vec<String>,

    /// Installed minitest major version, skipping detection
    #[arg(long, global = true, value_name = "MAJOR")]
    pub minitest_version: Option<u64>,
}

impl GlobalArgs {
    /// Layer the command-line overrides on top of a loaded configuration
    pub fn apply(&self, mut config: Config) -> Config {
        if self.all_after_pass {
            config.all_after_pass = true;
        }
        if self.bundler {
            config.bundler = true;
        }
        if self.no_bundler {
            config.bundler = false;
        }
        if self.rubygems {
            config.rubygems = true;
        }
        if self.drb {
            config.drb = BackendSwitch::Enabled(true);
        }
        if let Some(zeus) = &self.zeus {
            config.zeus = switch(zeus);
        }
        if let Some(spring) = &self.spring {
            config.spring = switch(spring);
        }
        config.include.extend(self.include.iter().cloned());
        if !self.test_folders.is_empty() {
            config.test_folders = self.test_folders.clone();
        }
        config.cli.extend(self.cli.iter().cloned());
        config
    }
}

fn switch(value: &Option<String>) -> BackendSwitch {
    match value {
        Some(command) => BackendSwitch::Command(command.clone()),
        None => BackendSwitch::Enabled(true),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the given test files, or the whole suite when none are given
    #[command(visible_alias = "r")]
    Run {
        /// Test files to run
        paths: Vec<String>,

        /// Treat the paths as the full suite
        #[arg(long)]
        all: bool,
    },
    /// Run the tests affected by modified files
    #[command(visible_alias = "m")]
    Modified {
        /// Paths reported as modified
        paths: Vec<String>,
    },
    /// Report added files; always succeeds without running tests
    ///
    /// Each invocation discovers test files afresh, so this only mirrors the
    /// watcher event for hosts that forward every event.
    Added { paths: Vec<String> },
    /// Report removed files; always succeeds without running tests
    ///
    /// Each invocation discovers test files afresh, so this only mirrors the
    /// watcher event for hosts that forward every event.
    Removed { paths: Vec<String> },
    /// Show the resolved backend and the command for the given paths
    #[command(visible_alias = "s")]
    Show {
        paths: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a default .minirun.json
    Init {
        /// Directory to write the configuration to
        #[arg(long)]
        cwd: Option<String>,

        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Dispatch a parsed command line; `Ok(false)` means the tests failed
pub fn execute(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Run { paths, all } => run_command(&cli.global, &paths, all),
        Commands::Modified { paths } => modified_command(&cli.global, &paths),
        Commands::Added { paths } => added_command(&cli.global, &paths),
        Commands::Removed { paths } => removed_command(&cli.global, &paths),
        Commands::Show { paths, json } => show_command(&cli.global, &paths, json).map(|_| true),
        Commands::Init { cwd, force } => init_command(cwd.as_deref(), force).map(|_| true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("minirun").chain(args.iter().copied())).unwrap()
    }

    fn base() -> Config {
        Config {
            bundler: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_backend_flags() {
        let cli = parse(&["--zeus", "show"]);
        let config = cli.global.apply(base());
        assert_eq!(config.zeus, BackendSwitch::Enabled(true));

        let cli = parse(&["--spring=rake test", "show", "test/a_test.rb"]);
        let config = cli.global.apply(base());
        assert_eq!(config.spring, BackendSwitch::Command("rake test".to_string()));
        assert!(matches!(cli.command, Commands::Show { ref paths, .. } if paths == &["test/a_test.rb"]));
    }

    #[test]
    fn test_list_overrides() {
        let cli = parse(&[
            "--no-bundler",
            "-I",
            "lib",
            "--test-folder",
            "spec",
            "--cli",
            "--seed 1",
            "run",
        ]);
        let config = cli.global.apply(base());

        assert!(!config.bundler);
        assert_eq!(config.include, vec!["lib"]);
        assert_eq!(config.test_folders, vec!["spec"]);
        assert_eq!(config.cli, vec!["--seed 1"]);
    }

    #[test]
    fn test_event_commands_accept_empty_paths() {
        let cli = parse(&["modified"]);
        assert!(matches!(cli.command, Commands::Modified { ref paths } if paths.is_empty()));

        let cli = parse(&["added"]);
        assert!(matches!(cli.command, Commands::Added { ref paths } if paths.is_empty()));

        let cli = parse(&["removed"]);
        assert!(matches!(cli.command, Commands::Removed { ref paths } if paths.is_empty()));
    }

    #[test]
    fn test_directory_flag() {
        let cli = parse(&["-C", "/srv/app", "run"]);
        assert_eq!(cli.global.directory, Some(PathBuf::from("/srv/app")));
    }
}
