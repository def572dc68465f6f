//! Minitest version detection

use crate::interfaces::VersionProbe;
use std::process::Command;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Prints the installed minitest version; minitest 4 has no `minitest.rb`
const VERSION_SCRIPT: &str = "begin; require 'minitest'; rescue LoadError; require 'minitest/unit'; end; \
     print(defined?(Minitest::VERSION) ? Minitest::VERSION : MiniTest::Unit::VERSION)";

/// Asks ruby for the minitest version once and remembers the answer.
///
/// When ruby or minitest cannot be queried the modern behavior (>= 5) is
/// assumed, so no compatibility shim gets injected.
#[derive(Debug, Default)]
pub struct RubyVersionProbe {
    bundler: bool,
    answer: OnceLock<bool>,
}

impl RubyVersionProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query through `bundle exec` so the locked minitest is the one asked
    pub fn with_bundler(mut self, bundler: bool) -> Self {
        self.bundler = bundler;
        self
    }

    fn query(&self) -> bool {
        let mut cmd = if self.bundler {
            let mut cmd = Command::new("bundle");
            cmd.args(["exec", "ruby"]);
            cmd
        } else {
            Command::new("ruby")
        };
        cmd.args(["-e", VERSION_SCRIPT]);

        match cmd.output() {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                match parse_major_version(&version) {
                    Some(major) => {
                        debug!("Detected minitest {}", version.trim());
                        major >= 5
                    }
                    None => {
                        warn!("Unrecognized minitest version {:?}, assuming >= 5", version);
                        true
                    }
                }
            }
            Ok(output) => {
                warn!(
                    "Could not determine minitest version ({}), assuming >= 5",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                true
            }
            Err(e) => {
                warn!("Could not run ruby to detect minitest version: {}", e);
                true
            }
        }
    }
}

impl VersionProbe for RubyVersionProbe {
    fn minitest_version_gte_5(&self) -> bool {
        *self.answer.get_or_init(|| self.query())
    }
}

/// A version answer decided up front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedVersionProbe(pub bool);

impl VersionProbe for FixedVersionProbe {
    fn minitest_version_gte_5(&self) -> bool {
        self.0
    }
}

/// Major component of a dotted version string
pub fn parse_major_version(version: &str) -> Option<u64> {
    version.trim().split('.').next()?.parse().ok()
}
