//! Filesystem-backed test file inspector
//!
//! Walks the configured test folders and matches file names against the
//! test-file glob patterns. The full listing is memoized until cleared.

use crate::{
    error::{Error, Result},
    interfaces::Inspector,
};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;
use walkdir::WalkDir;

pub struct FileInspector {
    root: PathBuf,
    test_folders: Vec<String>,
    patterns: GlobSet,
    memoized: Mutex<Option<Vec<String>>>,
}

impl FileInspector {
    /// Inspect relative to the current working directory
    pub fn new(test_folders: &[String], test_file_patterns: &[String]) -> Result<Self> {
        let patterns = build_glob_set(test_file_patterns)?;

        Ok(Self {
            root: PathBuf::from("."),
            test_folders: test_folders.to_vec(),
            patterns,
            memoized: Mutex::new(None),
        })
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    fn is_test_file_name(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.patterns.is_match(name))
    }

    /// Test files below `folder`, relative to the root, sorted
    fn test_files_in(&self, folder: &str) -> Vec<String> {
        let start = self.root.join(folder);
        if !start.is_dir() {
            debug!("Test folder {:?} does not exist", start);
            return Vec::new();
        }

        let mut files: Vec<String> = WalkDir::new(&start)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry under {:?}: {}", start, e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.is_test_file_name(entry.path()))
            .filter_map(|entry| self.relative(entry.path()))
            .collect();

        files.sort();
        files
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<&str> = relative
            .components()
            .filter_map(|component| component.as_os_str().to_str())
            .collect();
        Some(parts.join("/"))
    }

    /// A directory inside one of the test folders, named without an extension
    fn is_test_folder(&self, path: &str) -> bool {
        let trimmed = path.trim_start_matches('/');
        let under_test_folder = self.test_folders.iter().any(|folder| {
            trimmed == folder.as_str()
                || trimmed
                    .strip_prefix(folder.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        });
        let has_extension = Path::new(trimmed).extension().is_some();

        under_test_folder && !has_extension && self.root.join(trimmed).is_dir()
    }
}

impl Inspector for FileInspector {
    fn clean(&self, paths: &[String]) -> Vec<String> {
        let known = self.all_test_files();
        let mut cleaned: Vec<String> = Vec::new();

        for path in paths {
            let expanded = if known.contains(path) {
                vec![path.clone()]
            } else if self.is_test_folder(path) {
                self.test_files_in(path.trim_end_matches('/'))
            } else {
                debug!("Ignoring non-test path {}", path);
                continue;
            };

            for file in expanded {
                if !cleaned.contains(&file) {
                    cleaned.push(file);
                }
            }
        }

        cleaned
    }

    fn clean_all(&self) -> Vec<String> {
        self.clean(&self.test_folders)
    }

    fn all_test_files(&self) -> Vec<String> {
        let mut memoized = self.memoized.lock().unwrap_or_else(PoisonError::into_inner);
        memoized
            .get_or_insert_with(|| {
                let mut files: Vec<String> = Vec::new();
                for folder in &self.test_folders {
                    for file in self.test_files_in(folder) {
                        if !files.contains(&file) {
                            files.push(file);
                        }
                    }
                }
                debug!("Discovered {} test files", files.len());
                files
            })
            .clone()
    }

    fn clear_memoized_test_files(&self) {
        let mut memoized = self.memoized.lock().unwrap_or_else(PoisonError::into_inner);
        *memoized = None;
    }
}

/// Compile the file-name globs (`*`, `?`, `[ab]`, `{a,b}`) into one set
pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let pattern_error = |pattern: &str, source| Error::PatternError {
        pattern: pattern.to_string(),
        source,
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(|e| pattern_error(pattern, e))?);
    }
    builder
        .build()
        .map_err(|e| pattern_error(&patterns.join(", "), e))
}
