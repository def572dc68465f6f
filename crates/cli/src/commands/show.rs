use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::GlobalArgs;
use crate::config::build_runner;
use crate::display::print_command_breakdown;

#[derive(Debug, Serialize)]
struct ShowReport<'a> {
    backend: &'static str,
    subcommand: Option<&'a str>,
    bundler: bool,
    rubygems: bool,
    paths: &'a [String],
    tokens: &'a [String],
    command: String,
}

pub fn show_command(global: &GlobalArgs, paths: &[String], json: bool) -> Result<()> {
    let runner = build_runner(global)?;

    let paths = if paths.is_empty() {
        runner.inspector().clean_all()
    } else {
        paths.to_vec()
    };

    let resolved = runner.resolved_backend();
    let command = runner.command_for(&paths);

    if json {
        let subcommand = match &resolved.backend {
            minirun_core::Backend::Zeus(sub) | minirun_core::Backend::Spring(sub) => {
                Some(sub.as_str())
            }
            _ => None,
        };
        let report = ShowReport {
            backend: resolved.backend.name(),
            subcommand,
            bundler: resolved.modifiers.bundler,
            rubygems: resolved.modifiers.rubygems,
            paths: &paths,
            tokens: &command.tokens,
            command: command.to_shell_command(),
        };
        let output =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{output}");
        return Ok(());
    }

    println!("🔍 Test files: {}", paths.len());
    println!("{}", "=".repeat(80));
    print_command_breakdown(&resolved, &command);
    println!("{}", "=".repeat(80));
    println!("🚀 {}", command.to_shell_command());

    Ok(())
}
