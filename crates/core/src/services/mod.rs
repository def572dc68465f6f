//! Default implementations of the runner's collaborator interfaces

pub mod bundler_env;
pub mod file_inspector;
pub mod log_sinks;
pub mod shell_executor;
pub mod version_probe;

pub use bundler_env::{BundlerCleanEnv, NoIsolation};
pub use file_inspector::FileInspector;
pub use log_sinks::{LogMessenger, LogNotifier};
pub use shell_executor::{DryRunExecutor, ShellExecutor};
pub use version_probe::{FixedVersionProbe, RubyVersionProbe};
