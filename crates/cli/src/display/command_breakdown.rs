use minirun_core::{Backend, CommandLine, ResolvedBackend};

pub fn print_command_breakdown(resolved: &ResolvedBackend, command: &CommandLine) {
    print!("{}", format_command_breakdown(resolved, command));
}

pub fn format_command_breakdown(resolved: &ResolvedBackend, command: &CommandLine) -> String {
    let mut out = String::from("   🔧 Command breakdown:\n");

    out.push_str(&format!("      • backend: {}\n", resolved.backend.name()));
    match &resolved.backend {
        Backend::Zeus(sub) | Backend::Spring(sub) => {
            out.push_str(&format!("      • subcommand: {sub}\n"));
        }
        Backend::Drb | Backend::Plain => {}
    }

    let mut wrappers = Vec::new();
    if resolved.modifiers.bundler {
        wrappers.push("bundler");
    }
    if resolved.modifiers.rubygems {
        wrappers.push("rubygems");
    }
    if !wrappers.is_empty() {
        out.push_str(&format!("      • wrappers: {}\n", wrappers.join(", ")));
    }

    let includes: Vec<&str> = command
        .tokens
        .iter()
        .filter_map(|token| token.strip_prefix("-I"))
        .map(|folder| folder.trim_matches('"'))
        .collect();
    if !includes.is_empty() {
        out.push_str(&format!("      • load path: {}\n", includes.join(", ")));
    }

    let requires: Vec<&str> = command
        .tokens
        .iter()
        .filter_map(|token| token.strip_prefix("-r "))
        .collect();
    if !requires.is_empty() {
        out.push_str(&format!("      • requires: {}\n", requires.join(", ")));
    }

    if let Some(separator) = command.tokens.iter().position(|token| token == "--") {
        let passthrough = &command.tokens[separator + 1..];
        if !passthrough.is_empty() {
            out.push_str(&format!("      • passthrough: {}\n", passthrough.join(" ")));
        }
    }

    out
}
