//! Migration of retired configuration keys

use serde_json::Value;

use super::Config;

/// Keys that are rewritten into `cli` flags, in migration order
const FLAG_KEYS: [&str; 2] = ["seed", "verbose"];

/// A retired key found in a configuration, with the notice to show the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub key: String,
    pub message: String,
}

impl Deprecation {
    fn notify() -> Self {
        Self {
            key: "notify".to_string(),
            message: "DEPRECATION WARNING: The :notify option is deprecated. \
                      The host notification configuration is used."
                .to_string(),
        }
    }

    fn flag(key: &str) -> Self {
        Self {
            key: key.to_string(),
            message: format!(
                "DEPRECATION WARNING: The :{key} option is deprecated. Pass standard command \
                 line argument \"--{key}\" to Minitest with the :cli option."
            ),
        }
    }
}

/// Rewrite `seed`/`verbose` into `cli` flags and collect deprecation notices.
///
/// `seed`/`verbose` are removed from the configuration; a `false` or `null`
/// value is dropped without producing a flag or a notice. `notify` stays in
/// place and only yields a notice.
pub fn migrate_deprecated(mut config: Config) -> (Config, Vec<Deprecation>) {
    let mut deprecations = Vec::new();

    if config.extra.contains_key("notify") {
        deprecations.push(Deprecation::notify());
    }

    for key in FLAG_KEYS {
        let Some(value) = config.extra.remove(key) else {
            continue;
        };

        let flag = match value {
            Value::Null | Value::Bool(false) => continue,
            Value::Bool(true) => format!("--{key}"),
            Value::String(value) => format!("--{key} {value}"),
            other => format!("--{key} {other}"),
        };

        config.cli.push(flag);
        deprecations.push(Deprecation::flag(key));
    }

    (config, deprecations)
}
