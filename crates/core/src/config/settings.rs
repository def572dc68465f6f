use crate::{
    error::{Error, Result},
    utils::{null_as_default, one_or_many},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::deprecated::{Deprecation, migrate_deprecated};

/// File names searched for when discovering a configuration file
pub const CONFIG_FILE_NAMES: [&str; 2] = [".minirun.json", "minirun.json"];

/// A pre-warmed backend switch: off, on with its default sub-command, or on
/// with an explicit sub-command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackendSwitch {
    Enabled(bool),
    Command(String),
}

impl Default for BackendSwitch {
    fn default() -> Self {
        BackendSwitch::Enabled(false)
    }
}

impl BackendSwitch {
    /// Any string (even an empty one) counts as enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            BackendSwitch::Enabled(enabled) => *enabled,
            BackendSwitch::Command(_) => true,
        }
    }

    /// The configured sub-command, or `default` when the switch is a plain `true`.
    pub fn command_or(&self, default: &str) -> String {
        match self {
            BackendSwitch::Command(command) => command.clone(),
            BackendSwitch::Enabled(_) => default.to_string(),
        }
    }
}

impl From<bool> for BackendSwitch {
    fn from(enabled: bool) -> Self {
        BackendSwitch::Enabled(enabled)
    }
}

impl From<&str> for BackendSwitch {
    fn from(command: &str) -> Self {
        BackendSwitch::Command(command.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub all_after_pass: bool,
    pub bundler: bool,
    pub rubygems: bool,

    #[serde(deserialize_with = "null_as_default")]
    pub drb: BackendSwitch,
    #[serde(deserialize_with = "null_as_default")]
    pub zeus: BackendSwitch,
    #[serde(deserialize_with = "null_as_default")]
    pub spring: BackendSwitch,

    #[serde(deserialize_with = "one_or_many")]
    pub include: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub test_folders: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub test_file_patterns: Vec<String>,

    /// Extra arguments forwarded verbatim to the test process
    #[serde(deserialize_with = "one_or_many")]
    pub cli: Vec<String>,

    /// Keys this crate does not interpret, kept as given
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            all_after_pass: false,
            bundler: gemfile_present(),
            rubygems: false,
            drb: BackendSwitch::default(),
            zeus: BackendSwitch::default(),
            spring: BackendSwitch::default(),
            include: Vec::new(),
            test_folders: vec!["test".to_string(), "spec".to_string()],
            test_file_patterns: vec![
                "*_test.rb".to_string(),
                "test_*.rb".to_string(),
                "*_spec.rb".to_string(),
            ],
            cli: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse {}: {e}", path.display())))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Migrate deprecated keys and clean up the folder/pattern lists.
    ///
    /// The returned warnings are meant to be reported once by the caller.
    pub fn finalize(self) -> (Self, Vec<Deprecation>) {
        let (mut config, deprecations) = migrate_deprecated(self);
        config.test_folders = dedup_non_empty(config.test_folders);
        config.test_file_patterns = dedup_non_empty(config.test_file_patterns);
        (config, deprecations)
    }
}

/// Whether a dependency lock manifest sits in the current working directory
pub fn gemfile_present() -> bool {
    std::env::current_dir()
        .map(|dir| dir.join("Gemfile").exists())
        .unwrap_or(false)
}

fn dedup_non_empty(items: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(items.len());
    for item in items {
        if !item.is_empty() && !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}
