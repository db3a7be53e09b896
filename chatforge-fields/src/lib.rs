//! Field descriptor registry for the ChatForge configuration engine
//!
//! `chatforge-fields` is a standalone, schema-only crate: it owns the catalog
//! of field descriptors that drives every import, export, and validation pass
//! in `chatforge-config`, but knows nothing about ENV or YAML text itself.
//!
//! # Architecture
//!
//! - **Schema-only**: Owns field identity, types, addresses, and defaults,
//!   never field values
//! - **Static catalog**: The built-in descriptor table is code, loaded once
//!   per process and immutable for the process lifetime
//! - **Fail-fast**: Registry construction asserts the uniqueness invariants
//!   (no duplicate id, ENV key, or YAML path) and refuses to boot otherwise

pub mod catalog;
pub mod error;
pub mod registry;
pub mod types;

pub use catalog::builtin_descriptors;
pub use error::{RegistryError, Result};
pub use registry::FieldRegistry;
pub use types::{
    ConfigObject, EnvTransformer, FieldCategory, FieldDescriptor, FieldType, YamlTransformer,
    OVERRIDES_KEY,
};
