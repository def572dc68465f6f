//! Test file discovery interface

/// Knows which paths are test files.
///
/// Implementations may memoize the discovered listing; the runner invalidates
/// it when files are added or removed.
pub trait Inspector: Send + Sync {
    /// Keep only the given paths that are test files (test folders expand to
    /// the test files inside them)
    fn clean(&self, paths: &[String]) -> Vec<String>;

    /// Every test file under the configured test folders, as a run target
    fn clean_all(&self) -> Vec<String>;

    /// The complete known test-file listing
    fn all_test_files(&self) -> Vec<String>;

    /// Forget the memoized listing so the next call rediscovers it
    fn clear_memoized_test_files(&self);
}
