//! FieldRegistry: the single schema that drives import, export, and
//! validation.
//!
//! An ordered, immutable list of [`FieldDescriptor`]s with in-memory indexes
//! for lookup by id, ENV key, and YAML path. Construction asserts the
//! uniqueness invariants and fails loudly, turning a silent data-corruption
//! risk (two descriptors claiming the same external key) into an immediate
//! boot failure.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::catalog::builtin_descriptors;
use crate::error::{RegistryError, Result};
use crate::types::{ConfigObject, FieldDescriptor};

static BUILTIN: Lazy<FieldRegistry> = Lazy::new(|| {
    FieldRegistry::new(builtin_descriptors())
        .expect("built-in field catalog violates registry invariants")
});

/// Ordered, immutable catalog of field descriptors.
///
/// Read-only for the process lifetime; safe for unlimited concurrent readers.
#[derive(Debug)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    by_id: HashMap<&'static str, usize>,
    by_env_key: HashMap<&'static str, usize>,
    by_yaml_path: HashMap<&'static str, usize>,
}

impl FieldRegistry {
    /// Build a registry, asserting the uniqueness invariants.
    ///
    /// Legacy ids are indexed alongside canonical ids so `get_by_id` resolves
    /// historical spellings, and they participate in the collision checks.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        let mut by_id: HashMap<&'static str, usize> = HashMap::new();
        let mut by_env_key: HashMap<&'static str, usize> = HashMap::new();
        let mut by_yaml_path: HashMap<&'static str, usize> = HashMap::new();

        for (idx, field) in fields.iter().enumerate() {
            if by_id.insert(field.id, idx).is_some() {
                return Err(RegistryError::DuplicateId { id: field.id.into() });
            }

            if let Some(env_key) = field.env_key {
                if let Some(&prev) = by_env_key.get(env_key) {
                    return Err(RegistryError::DuplicateEnvKey {
                        env_key: env_key.into(),
                        first: fields[prev].id.into(),
                        second: field.id.into(),
                    });
                }
                by_env_key.insert(env_key, idx);
            }

            if let Some(yaml_path) = field.yaml_path {
                if let Some(&prev) = by_yaml_path.get(yaml_path) {
                    return Err(RegistryError::DuplicateYamlPath {
                        yaml_path: yaml_path.into(),
                        first: fields[prev].id.into(),
                        second: field.id.into(),
                    });
                }
                by_yaml_path.insert(yaml_path, idx);
            }
        }

        // Legacy ids resolve through the same index, so they must not shadow
        // a canonical id or each other.
        for (idx, field) in fields.iter().enumerate() {
            for legacy in field.legacy_ids {
                if let Some(&prev) = by_id.get(legacy) {
                    return Err(RegistryError::LegacyIdCollision {
                        id: field.id.into(),
                        legacy_id: (*legacy).into(),
                        other: fields[prev].id.into(),
                    });
                }
                by_id.insert(legacy, idx);
            }
        }

        debug!(
            fields = fields.len(),
            env_keys = by_env_key.len(),
            yaml_paths = by_yaml_path.len(),
            "field registry loaded"
        );

        Ok(Self {
            fields,
            by_id,
            by_env_key,
            by_yaml_path,
        })
    }

    /// The built-in catalog, validated on first access.
    ///
    /// Aborts the process with a descriptive panic if a catalog edit broke an
    /// invariant, a deliberate startup-abort per the registry contract.
    pub fn builtin() -> &'static FieldRegistry {
        &BUILTIN
    }

    /// Look up a descriptor by id. Resolves legacy spellings to the
    /// canonical descriptor.
    pub fn get_by_id(&self, id: &str) -> Option<&FieldDescriptor> {
        self.by_id.get(id).map(|&i| &self.fields[i])
    }

    /// Look up a descriptor by its ENV key.
    pub fn get_by_env_key(&self, key: &str) -> Option<&FieldDescriptor> {
        self.by_env_key.get(key).map(|&i| &self.fields[i])
    }

    /// Look up a descriptor by its YAML dot-path.
    pub fn get_by_yaml_path(&self, path: &str) -> Option<&FieldDescriptor> {
        self.by_yaml_path.get(path).map(|&i| &self.fields[i])
    }

    /// All descriptors, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Descriptors that define an ENV key, in catalog order.
    pub fn env_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.env_key.is_some())
    }

    /// Descriptors that define a YAML path, in catalog order.
    pub fn yaml_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.yaml_path.is_some())
    }

    /// Every declared ENV key.
    pub fn env_keys(&self) -> HashSet<&'static str> {
        self.by_env_key.keys().copied().collect()
    }

    /// Every declared YAML path.
    pub fn yaml_paths(&self) -> HashSet<&'static str> {
        self.by_yaml_path.keys().copied().collect()
    }

    /// Build a fresh configuration object holding every declared default,
    /// keyed by field id.
    pub fn generate_defaults(&self) -> ConfigObject {
        let mut config = ConfigObject::new();
        for field in &self.fields {
            if let Some(default) = &field.default {
                config.insert(field.id.to_string(), default.clone());
            }
        }
        config
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
