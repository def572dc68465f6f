//! minirun-core - the execution core of a minitest adapter for file watchers
//!
//! This crate provides functionality to:
//! - Resolve which backend runs the tests (plain ruby, drb, zeus or spring)
//! - Synthesize the exact command line for that backend's dialect
//! - Execute it, notify for detached backends, and re-run the suite after a pass
pub mod backend;
pub mod command;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod runner;
pub mod services;
pub mod utils;

// Re-export commonly used types and traits
pub use backend::{Backend, Modifiers, ResolvedBackend};
pub use command::CommandLine;
pub use config::{BackendSwitch, Config, Deprecation};
pub use error::{Error, Result};
pub use runner::{RunOptions, Runner, RunnerBuilder};
