//! Error types for the transformation engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised by the transformation engine.
///
/// Structural validation failures are NOT errors; they come back as result
/// structures from the validators. These variants cover malformed input text
/// and serialization failures only.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML text itself could not be parsed
    #[error("failed to parse YAML input: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// Profile envelope JSON could not be parsed or serialized
    #[error("failed to process profile JSON: {0}")]
    Json(#[from] serde_json::Error),
}
