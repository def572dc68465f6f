//! Capabilities the runner needs from its host
//!
//! Each trait is a seam: the services module provides working defaults, and
//! tests substitute recording fakes.

pub mod executor;
pub mod inspector;
pub mod isolation;
pub mod messenger;
pub mod version;

pub use executor::ProcessExecutor;
pub use inspector::Inspector;
pub use isolation::EnvironmentIsolation;
pub use messenger::{InfoOptions, Messenger, NotifyImage, Notifier};
pub use version::VersionProbe;
