//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading, saving or resolving client config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config or key file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to write a config file.
    #[error("failed to write config file '{path}': {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse or serialize YAML.
    #[error("failed to parse YAML config: {0}")]
    ParseYaml(String),

    /// Context not found.
    #[error("context '{0}' not found")]
    ContextNotFound(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}
