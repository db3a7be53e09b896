//! Bidirectional transformation engine between the platform's two
//! configuration surfaces (ENV text and YAML text) and one typed internal
//! configuration object.
//!
//! The registry crate ([`chatforge_fields`]) owns the schema; this crate owns
//! every movement of data through it:
//!
//! - **Validation** ([`validate`]): strict, all-or-nothing structural checks
//!   of raw input against the registry, returned as data rather than errors.
//! - **Import** ([`import`]): soft coercion of validated input into the
//!   configuration object, skipping unresolved `${NAME}` placeholders on
//!   the YAML side only.
//! - **Export** ([`export`]): deterministic regeneration of both file
//!   formats, category-ordered ENV with commented defaults, section-gated
//!   YAML with secret placeholders.
//! - **Overrides** ([`overrides`]): the inherit-platform-default flag per
//!   field, stored inside the configuration object itself.
//! - **Canonicalization** ([`canonical`]): legacy field-id collapse.
//! - **Secrets** ([`secrets`]): generated credentials behind the
//!   [`SecretProvider`] seam, cached for byte-stable exports.
//! - **Profiles** ([`profile`]): the JSON envelope for saved configurations.
//!
//! A full round trip looks like:
//!
//! ```
//! use chatforge_config::{
//!     generate_env_text, map_env_to_configuration, parse_env_text,
//!     validate_env_vars, CachedSecretProvider,
//! };
//! use chatforge_fields::FieldRegistry;
//!
//! let registry = FieldRegistry::builtin();
//! let vars = parse_env_text("PORT=8080\nAPP_TITLE=My Chat\n");
//! assert!(validate_env_vars(registry, &vars).valid);
//!
//! let config = map_env_to_configuration(registry, &vars);
//! let provider = CachedSecretProvider::new();
//! let env_text = generate_env_text(registry, &config, &provider, "demo");
//! assert!(env_text.contains("PORT=8080"));
//! ```

pub mod address;
pub mod canonical;
pub mod envfile;
pub mod error;
pub mod export;
pub mod import;
pub mod overrides;
pub mod profile;
pub mod secrets;
pub mod validate;

pub use canonical::{canonicalize, canonicalized};
pub use envfile::parse_env_text;
pub use error::{ConfigError, Result};
pub use export::{generate_env_text, generate_yaml_text};
pub use import::{
    is_placeholder, map_env_to_configuration, map_yaml_to_configuration, parse_yaml_text,
};
pub use overrides::{
    clear_all_overrides, effective_value, is_explicitly_set, reset_to_default,
    set_field_override, use_platform_default,
};
pub use profile::{ConfigProfile, ProfileMetadata};
pub use secrets::{CachedSecretProvider, FixedSecretProvider, GeneratedSecrets, SecretProvider};
pub use validate::{
    validate_env_vars, validate_yaml_fields, EnvValidation, YamlOnlyVar, YamlValidation,
};
