//! Selection of the test-execution backend and its invocation wrappers

use crate::config::Config;
use std::fmt;

/// Sub-command used for zeus when the switch is a plain `true`
pub const DEFAULT_ZEUS_COMMAND: &str = "test";

/// Sub-command used for spring when the switch is a plain `true`
pub const DEFAULT_SPRING_COMMAND: &str = "testunit";

/// The mechanism that actually runs the tests. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Backend {
    Drb,
    Zeus(String),
    Spring(String),
    Plain,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Drb => "drb",
            Backend::Zeus(_) => "zeus",
            Backend::Spring(_) => "spring",
            Backend::Plain => "plain",
        }
    }

    /// Zeus and spring run tests in a detached process whose reporting the
    /// host never sees.
    pub fn runs_detached(&self) -> bool {
        matches!(self, Backend::Zeus(_) | Backend::Spring(_))
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Zeus(command) | Backend::Spring(command) => {
                write!(f, "{} ({command})", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Invocation wrappers that compose with any backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub bundler: bool,
    pub rubygems: bool,
}

/// The active backend plus its modifiers, computed once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBackend {
    pub backend: Backend,
    pub modifiers: Modifiers,
}

pub trait BackendResolver {
    fn resolve(config: &Config) -> ResolvedBackend;
}

pub struct DefaultBackendResolver;

impl BackendResolver for DefaultBackendResolver {
    fn resolve(config: &Config) -> ResolvedBackend {
        // drb wins over zeus, zeus wins over spring
        let backend = if config.drb.is_enabled() {
            Backend::Drb
        } else if config.zeus.is_enabled() {
            Backend::Zeus(config.zeus.command_or(DEFAULT_ZEUS_COMMAND))
        } else if config.spring.is_enabled() {
            Backend::Spring(config.spring.command_or(DEFAULT_SPRING_COMMAND))
        } else {
            Backend::Plain
        };

        // Keyed off the spring switch itself, even when drb or zeus won above
        let bundler = config.bundler && !config.spring.is_enabled();
        let rubygems = !bundler && config.rubygems;

        ResolvedBackend {
            backend,
            modifiers: Modifiers { bundler, rubygems },
        }
    }
}

/// Resolve with the default priority order
pub fn resolve(config: &Config) -> ResolvedBackend {
    DefaultBackendResolver::resolve(config)
}

#[cfg(test)]
use crate::config::BackendSwitch;

#[cfg(test)]
impl Config {
    /// Switch on exactly one backend, the inverse of [`resolve`]
    pub fn with_backend(mut self, backend: &Backend) -> Self {
        self.drb = BackendSwitch::Enabled(matches!(backend, Backend::Drb));
        self.zeus = match backend {
            Backend::Zeus(command) => BackendSwitch::Command(command.clone()),
            _ => BackendSwitch::Enabled(false),
        };
        self.spring = match backend {
            Backend::Spring(command) => BackendSwitch::Command(command.clone()),
            _ => BackendSwitch::Enabled(false),
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            bundler: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_by_default() {
        let resolved = resolve(&config());
        assert_eq!(resolved.backend, Backend::Plain);
        assert_eq!(resolved.modifiers, Modifiers::default());
    }

    #[test]
    fn test_single_switches() {
        let drb = Config {
            drb: true.into(),
            ..config()
        };
        assert_eq!(resolve(&drb).backend, Backend::Drb);

        let zeus = Config {
            zeus: true.into(),
            ..config()
        };
        assert_eq!(resolve(&zeus).backend, Backend::Zeus("test".to_string()));

        let spring = Config {
            spring: "rake test".into(),
            ..config()
        };
        assert_eq!(
            resolve(&spring).backend,
            Backend::Spring("rake test".to_string())
        );
    }

    #[test]
    fn test_priority_drb_then_zeus_then_spring() {
        let all = Config {
            drb: true.into(),
            zeus: "custom".into(),
            spring: true.into(),
            ..config()
        };
        assert_eq!(resolve(&all).backend, Backend::Drb);

        let zeus_and_spring = Config {
            zeus: "custom".into(),
            spring: true.into(),
            ..config()
        };
        assert_eq!(
            resolve(&zeus_and_spring).backend,
            Backend::Zeus("custom".to_string())
        );
    }

    #[test]
    fn test_empty_command_string_still_enables() {
        let zeus = Config {
            zeus: BackendSwitch::Command(String::new()),
            ..config()
        };
        assert_eq!(resolve(&zeus).backend, Backend::Zeus(String::new()));
    }

    #[test]
    fn test_bundler_suppressed_by_spring() {
        let bundled = Config {
            bundler: true,
            rubygems: true,
            ..config()
        };
        let resolved = resolve(&bundled);
        assert!(resolved.modifiers.bundler);
        assert!(!resolved.modifiers.rubygems);

        let with_spring = Config {
            spring: true.into(),
            ..bundled.clone()
        };
        let resolved = resolve(&with_spring);
        assert!(!resolved.modifiers.bundler);
        assert!(resolved.modifiers.rubygems);

        // drb wins the backend, but spring still switches bundler off
        let drb_and_spring = Config {
            drb: true.into(),
            ..with_spring
        };
        let resolved = resolve(&drb_and_spring);
        assert_eq!(resolved.backend, Backend::Drb);
        assert!(!resolved.modifiers.bundler);
    }

    #[test]
    fn test_rubygems_only_without_bundler() {
        let rubygems = Config {
            rubygems: true,
            ..config()
        };
        let resolved = resolve(&rubygems);
        assert!(!resolved.modifiers.bundler);
        assert!(resolved.modifiers.rubygems);
    }

    #[test]
    fn test_display() {
        assert_eq!(Backend::Plain.to_string(), "plain");
        assert_eq!(Backend::Spring("testunit".into()).to_string(), "spring (testunit)");
    }
}
