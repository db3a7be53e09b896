//! Error types for the field registry

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors raised while constructing a registry.
///
/// All of these indicate a broken descriptor table. They are surfaced at
/// process start so a bad catalog edit fails the boot instead of silently
/// corrupting imports and exports later.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two descriptors share an id
    #[error("duplicate field id: {id}")]
    DuplicateId { id: String },

    /// Two descriptors share an ENV key
    #[error("duplicate ENV key '{env_key}' (fields '{first}' and '{second}')")]
    DuplicateEnvKey {
        env_key: String,
        first: String,
        second: String,
    },

    /// Two descriptors share a YAML path
    #[error("duplicate YAML path '{yaml_path}' (fields '{first}' and '{second}')")]
    DuplicateYamlPath {
        yaml_path: String,
        first: String,
        second: String,
    },

    /// A legacy id collides with a canonical id or another legacy id
    #[error("legacy id '{legacy_id}' of field '{id}' collides with field '{other}'")]
    LegacyIdCollision {
        id: String,
        legacy_id: String,
        other: String,
    },
}
