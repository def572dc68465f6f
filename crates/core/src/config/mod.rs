//! Configuration management for minirun

pub mod deprecated;
mod settings;

// Re-export main types
pub use deprecated::{Deprecation, migrate_deprecated};
pub use settings::{BackendSwitch, CONFIG_FILE_NAMES, Config, gemfile_present};
