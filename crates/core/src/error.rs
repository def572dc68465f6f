use std::io;

/// Errors that can occur while configuring or launching a test run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Execution error: {0}")]
    ExecutionError(String),

    #[error("Invalid test file pattern '{pattern}': {source}")]
    PatternError {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for minirun operations
pub type Result<T> = std::result::Result<T, Error>;
