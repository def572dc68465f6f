//! Test framework version interface

pub trait VersionProbe: Send + Sync {
    /// Whether the installed minitest is at major version 5 or above
    fn minitest_version_gte_5(&self) -> bool;
}
