use anyhow::{Context, Result, bail};
use minirun_core::Config;
use minirun_core::config::CONFIG_FILE_NAMES;
use std::{env, path::PathBuf};

pub fn init_command(cwd: Option<&str>, force: bool) -> Result<()> {
    let project_root = match cwd {
        Some(cwd) => PathBuf::from(cwd),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    let config_path = project_root.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        bail!("refusing to overwrite {}", config_path.display());
    }

    // Resolve the bundler default against the target directory, not our cwd
    let config = Config {
        bundler: project_root.join("Gemfile").exists(),
        ..Config::default()
    };

    config
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!("✅ Created config: {}", config_path.display());
    Ok(())
}
