use std::fmt;

/// A synthesized test command.
///
/// Tokens are shell fragments rather than argv entries: `-r minitest/autorun`
/// or `--seed 42` are single tokens, and `-I"test"` carries its own quoting.
/// The executor hands [`CommandLine::to_shell_command`] to the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub tokens: Vec<String>,
    pub working_dir: Option<String>,
    pub env: Vec<(String, String)>,
    /// Variables stripped from the inherited environment
    pub env_remove: Vec<String>,
}

impl CommandLine {
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            ..Default::default()
        }
    }

    pub fn with_working_dir(mut self, dir: String) -> Self {
        self.working_dir = Some(dir);
        self
    }

    pub fn with_env(mut self, key: String, value: String) -> Self {
        self.env.push((key, value));
        self
    }

    pub fn without_env(mut self, key: String) -> Self {
        if !self.env_remove.contains(&key) {
            self.env_remove.push(key);
        }
        self
    }

    /// Put `prefix` in front of the existing tokens
    pub fn prefixed<I, S>(mut self, prefix: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: Vec<String> = prefix.into_iter().map(Into::into).collect();
        tokens.append(&mut self.tokens);
        self.tokens = tokens;
        self
    }

    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn to_shell_command(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_command())
    }
}
