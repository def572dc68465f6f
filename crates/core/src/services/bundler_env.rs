//! Stripping the host's Bundler environment from spawned test commands

use crate::{command::CommandLine, error::Result, interfaces::EnvironmentIsolation};

/// Variables whose presence means the host itself runs under Bundler
const BUNDLER_MARKERS: [&str; 2] = ["BUNDLE_GEMFILE", "BUNDLE_BIN_PATH"];

/// Variables Bundler injects into child processes
const BUNDLER_INJECTED: [&str; 4] = ["RUBYOPT", "RUBYLIB", "BUNDLER_VERSION", "BUNDLER_SETUP"];

const ORIGINAL_PREFIX: &str = "BUNDLER_ORIG_";

/// Value Bundler stores for variables that were unset originally
const INTENTIONALLY_NIL: &str = "BUNDLER_ENVIRONMENT_PRESERVER_INTENTIONALLY_NIL";

/// Runs commands without the Bundler environment the host inherited.
///
/// `BUNDLE_*` and the injected ruby variables are removed, and every
/// `BUNDLER_ORIG_<NAME>` snapshot is put back as `<NAME>`. When the host is
/// not running under Bundler the command passes through untouched.
#[derive(Debug, Clone, Default)]
pub struct BundlerCleanEnv {
    vars: Vec<(String, String)>,
}

impl BundlerCleanEnv {
    /// Snapshot the current process environment
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.vars
            .iter()
            .any(|(key, _)| BUNDLER_MARKERS.contains(&key.as_str()))
    }

    /// The command as it should run outside the host's Bundler environment
    pub fn clean(&self, command: &CommandLine) -> CommandLine {
        let mut cleaned = command.clone();

        for (key, _) in &self.vars {
            if key.starts_with("BUNDLE_")
                || key.starts_with(ORIGINAL_PREFIX)
                || BUNDLER_INJECTED.contains(&key.as_str())
            {
                cleaned = cleaned.without_env(key.clone());
            }
        }

        for (key, value) in &self.vars {
            let Some(name) = key.strip_prefix(ORIGINAL_PREFIX) else {
                continue;
            };
            if value == INTENTIONALLY_NIL {
                cleaned = cleaned.without_env(name.to_string());
            } else {
                cleaned.env_remove.retain(|removed| removed != name);
                cleaned = cleaned.with_env(name.to_string(), value.clone());
            }
        }

        cleaned
    }
}

impl EnvironmentIsolation for BundlerCleanEnv {
    fn isolate(
        &self,
        command: &CommandLine,
        run: &dyn Fn(&CommandLine) -> Result<bool>,
    ) -> Result<bool> {
        if self.is_active() {
            run(&self.clean(command))
        } else {
            run(command)
        }
    }
}

/// Runs commands with the inherited environment as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIsolation;

impl EnvironmentIsolation for NoIsolation {
    fn isolate(
        &self,
        command: &CommandLine,
        run: &dyn Fn(&CommandLine) -> Result<bool>,
    ) -> Result<bool> {
        run(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn command() -> CommandLine {
        CommandLine::new(vec!["ruby".to_string()])
    }

    #[test]
    fn test_inactive_without_markers() {
        let isolation = BundlerCleanEnv::from_vars([("PATH", "/usr/bin"), ("RUBYOPT", "-w")]);
        assert!(!isolation.is_active());

        let seen = RefCell::new(None);
        let passed = isolation
            .isolate(&command(), &|cmd| {
                *seen.borrow_mut() = Some(cmd.clone());
                Ok(true)
            })
            .unwrap();

        assert!(passed);
        assert_eq!(seen.into_inner(), Some(command()));
    }

    #[test]
    fn test_strips_bundler_variables() {
        let isolation = BundlerCleanEnv::from_vars([
            ("PATH", "/usr/bin"),
            ("BUNDLE_GEMFILE", "/app/Gemfile"),
            ("BUNDLE_BIN_PATH", "/gems/bundler/exe/bundle"),
            ("RUBYOPT", "-rbundler/setup"),
            ("BUNDLER_VERSION", "2.5.0"),
        ]);
        assert!(isolation.is_active());

        let cleaned = isolation.clean(&command());

        assert_eq!(
            cleaned.env_remove,
            vec!["BUNDLE_GEMFILE", "BUNDLE_BIN_PATH", "RUBYOPT", "BUNDLER_VERSION"]
        );
        assert!(cleaned.env.is_empty());
        assert_eq!(cleaned.tokens, command().tokens);
    }

    #[test]
    fn test_restores_original_values() {
        let isolation = BundlerCleanEnv::from_vars([
            ("BUNDLE_GEMFILE", "/app/Gemfile"),
            ("RUBYOPT", "-rbundler/setup"),
            ("BUNDLER_ORIG_RUBYOPT", "-W0"),
            ("BUNDLER_ORIG_GEM_HOME", INTENTIONALLY_NIL),
        ]);

        let cleaned = isolation.clean(&command());

        assert_eq!(cleaned.env, vec![("RUBYOPT".to_string(), "-W0".to_string())]);
        assert!(!cleaned.env_remove.contains(&"RUBYOPT".to_string()));
        assert!(cleaned.env_remove.contains(&"GEM_HOME".to_string()));
        assert!(cleaned.env_remove.contains(&"BUNDLER_ORIG_RUBYOPT".to_string()));
    }

    #[test]
    fn test_no_isolation_passes_through() {
        let passed = NoIsolation.isolate(&command(), &|_| Ok(false)).unwrap();
        assert!(!passed);
    }
}
