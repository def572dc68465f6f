//! Per-backend command dialects

use super::CommandLine;
use crate::backend::{Backend, DEFAULT_SPRING_COMMAND, ResolvedBackend};
use std::path::Path;

/// Prefix that runs a command inside the locked dependency set
pub const BUNDLE_EXEC: [&str; 2] = ["bundle", "exec"];

/// Everything the synthesizer looks at. Two equal inputs give equal commands.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub resolved: &'a ResolvedBackend,
    pub paths: &'a [String],
    pub cli: &'a [String],
    pub test_folders: &'a [String],
    pub include: &'a [String],
    /// Set only when the installed minitest predates version 5
    pub legacy_shim: Option<&'a Path>,
}

pub fn synthesize(input: &SynthesisInput<'_>) -> CommandLine {
    let tokens = match &input.resolved.backend {
        Backend::Drb => drb_command(input.paths),
        Backend::Zeus(command) => zeus_command(command, input.paths),
        Backend::Spring(command) => spring_command(command, input),
        Backend::Plain => ruby_command(input),
    };

    let command = CommandLine::new(tokens);
    if input.resolved.modifiers.bundler {
        command.prefixed(BUNDLE_EXEC)
    } else {
        command
    }
}

fn drb_command(paths: &[String]) -> Vec<String> {
    let mut tokens = vec!["testdrb".to_string()];
    tokens.extend(relative_paths(paths));
    tokens
}

fn zeus_command(command: &str, paths: &[String]) -> Vec<String> {
    let mut tokens = vec!["zeus".to_string(), command.to_string()];
    tokens.extend(relative_paths(paths));
    tokens
}

fn spring_command(command: &str, input: &SynthesisInput<'_>) -> Vec<String> {
    let mut tokens = vec!["spring".to_string(), command.to_string()];

    // Custom sub-commands never get the shim, whatever the minitest version
    if command == DEFAULT_SPRING_COMMAND {
        if let Some(shim) = input.legacy_shim {
            tokens.push(shim.display().to_string());
        }
    }

    if input.cli.is_empty() {
        tokens.extend(input.paths.iter().map(|path| format!("TEST={path}")));
    } else {
        tokens.extend(input.paths.iter().cloned());
        tokens.push("--".to_string());
        tokens.extend(input.cli.iter().cloned());
    }

    tokens
}

fn ruby_command(input: &SynthesisInput<'_>) -> Vec<String> {
    let modifiers = input.resolved.modifiers;
    let mut tokens = vec!["ruby".to_string()];

    tokens.extend(
        input
            .test_folders
            .iter()
            .chain(input.include)
            .map(|folder| format!("-I\"{folder}\"")),
    );

    if modifiers.rubygems {
        tokens.push("-r rubygems".to_string());
    }
    if modifiers.bundler {
        tokens.push("-r bundler/setup".to_string());
    }
    tokens.push("-r minitest/autorun".to_string());
    tokens.extend(input.paths.iter().map(|path| format!("-r ./{path}")));

    if let Some(shim) = input.legacy_shim {
        tokens.push(format!("-r {}", shim.display()));
    }

    // Everything happens through autorun and the required files; this only
    // keeps ruby from reading a script on stdin.
    tokens.push("-e \"\"".to_string());

    tokens.push("--".to_string());
    tokens.extend(input.cli.iter().cloned());
    tokens
}

fn relative_paths(paths: &[String]) -> impl Iterator<Item = String> + '_ {
    paths.iter().map(|path| format!("./{path}"))
}
