//! Per-field override flags: does a stored value override the platform
//! default, or should the platform default flow through?
//!
//! The flags live inside the configuration object under the reserved
//! [`OVERRIDES_KEY`] map (`id -> bool`): `true` means inherit the platform
//! default, `false` or absent means the stored value overrides it. A value
//! an operator stored is an override unless they explicitly opted back into
//! the platform default.
//!
//! Every function here is total: missing fields, missing flags, and a missing
//! override map all resolve to a defined answer instead of an error.

use chatforge_fields::{ConfigObject, FieldRegistry, OVERRIDES_KEY};
use serde_json::Value;
use tracing::debug;

use crate::address;

/// Whether the field currently inherits the platform default.
///
/// True only when the override map explicitly records `true` for this id.
pub fn use_platform_default(config: &ConfigObject, id: &str) -> bool {
    matches!(
        config
            .get(OVERRIDES_KEY)
            .and_then(|m| m.as_object())
            .and_then(|m| m.get(id)),
        Some(Value::Bool(true))
    )
}

/// Whether the field has an explicitly stored value (including explicit
/// null) that is not inherit-marked.
pub fn is_explicitly_set(registry: &FieldRegistry, config: &ConfigObject, id: &str) -> bool {
    if use_platform_default(config, id) {
        return false;
    }
    match registry.get_by_id(id) {
        Some(field) => address::resolve(field, config).is_some(),
        None => config.contains_key(id),
    }
}

/// Record whether a field inherits the platform default (`true`) or keeps
/// its stored value as an override (`false`).
pub fn set_field_override(config: &mut ConfigObject, id: &str, use_default: bool) {
    let map = config
        .entry(OVERRIDES_KEY.to_string())
        .or_insert_with(|| Value::Object(ConfigObject::new()));
    if !map.is_object() {
        *map = Value::Object(ConfigObject::new());
    }
    if let Value::Object(map) = map {
        map.insert(id.to_string(), Value::Bool(use_default));
    }
}

/// Reset a field to its declared default and mark it inherit.
///
/// The default value is written back so the configuration remains readable
/// without the registry, but the `true` flag tells exporters to emit the
/// field as a commented default rather than a live assignment.
pub fn reset_to_default(registry: &FieldRegistry, config: &mut ConfigObject, id: &str) {
    if let Some(field) = registry.get_by_id(id) {
        match &field.default {
            Some(default) => address::store(field, config, default.clone()),
            None => {
                config.remove(field.storage_path());
            }
        }
        set_field_override(config, field.id, true);
        debug!(id = field.id, "field reset to platform default");
    }
}

/// Mark every registry field as inheriting the platform default. Wholesale
/// revert: stored values stay readable but no longer export as live lines.
pub fn clear_all_overrides(registry: &FieldRegistry, config: &mut ConfigObject) {
    for field in registry.iter() {
        set_field_override(config, field.id, true);
    }
}

/// The value exporters should emit for a field.
///
/// Inherit-marked fields and absent fields both yield the declared default;
/// everything else yields the stored value. `None` means the field has no
/// value at all (not stored, no default).
pub fn effective_value(registry: &FieldRegistry, config: &ConfigObject, id: &str) -> Option<Value> {
    let field = registry.get_by_id(id)?;
    if use_platform_default(config, field.id) {
        return field.default.clone();
    }
    match address::resolve(field, config) {
        Some(value) => Some(value.clone()),
        None => field.default.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> &'static FieldRegistry {
        FieldRegistry::builtin()
    }

    #[test]
    fn absent_flag_means_overriding() {
        let mut config = ConfigObject::new();
        config.insert("port".into(), json!(8080));
        assert!(!use_platform_default(&config, "port"));
        assert!(is_explicitly_set(registry(), &config, "port"));
        assert_eq!(effective_value(registry(), &config, "port"), Some(json!(8080)));
    }

    #[test]
    fn inherit_flag_restores_default_in_effective_value() {
        let mut config = ConfigObject::new();
        config.insert("port".into(), json!(8080));
        set_field_override(&mut config, "port", true);

        assert!(use_platform_default(&config, "port"));
        assert!(!is_explicitly_set(registry(), &config, "port"));
        assert_eq!(effective_value(registry(), &config, "port"), Some(json!(3080)));
    }

    #[test]
    fn false_flag_keeps_the_stored_value_live() {
        let mut config = ConfigObject::new();
        config.insert("port".into(), json!(8080));
        set_field_override(&mut config, "port", false);

        assert!(!use_platform_default(&config, "port"));
        assert!(is_explicitly_set(registry(), &config, "port"));
        assert_eq!(effective_value(registry(), &config, "port"), Some(json!(8080)));
    }

    #[test]
    fn reset_to_default_writes_default_and_marks_inherit() {
        let mut config = ConfigObject::new();
        config.insert("port".into(), json!(9999));
        reset_to_default(registry(), &mut config, "port");

        assert_eq!(config.get("port"), Some(&json!(3080)));
        assert!(use_platform_default(&config, "port"));
    }

    #[test]
    fn reset_without_default_removes_value() {
        let mut config = ConfigObject::new();
        config.insert("openaiApiKey".into(), json!("sk-test"));
        reset_to_default(registry(), &mut config, "openaiApiKey");

        assert!(!config.contains_key("openaiApiKey"));
        assert!(use_platform_default(&config, "openaiApiKey"));
    }

    #[test]
    fn explicit_null_counts_as_explicitly_set() {
        let mut config = ConfigObject::new();
        config.insert("customWelcome".into(), Value::Null);
        assert!(is_explicitly_set(registry(), &config, "customWelcome"));
    }

    #[test]
    fn absent_field_is_not_explicitly_set() {
        let config = ConfigObject::new();
        assert!(!is_explicitly_set(registry(), &config, "customWelcome"));
        assert_eq!(effective_value(registry(), &config, "customWelcome"), None);
    }

    #[test]
    fn clear_all_overrides_marks_every_registry_field_inherit() {
        let mut config = ConfigObject::new();
        config.insert("port".into(), json!(8080));
        config.insert("appTitle".into(), json!("Mine"));
        set_field_override(&mut config, "port", false);

        clear_all_overrides(registry(), &mut config);
        assert!(use_platform_default(&config, "port"));
        assert!(use_platform_default(&config, "appTitle"));
        // Fields the config never stored are flagged too.
        assert!(use_platform_default(&config, "customWelcome"));
        assert!(!is_explicitly_set(registry(), &config, "port"));
    }

    #[test]
    fn set_override_repairs_corrupt_map() {
        let mut config = ConfigObject::new();
        config.insert(OVERRIDES_KEY.into(), json!("not a map"));
        set_field_override(&mut config, "port", true);
        assert!(use_platform_default(&config, "port"));
    }

    #[test]
    fn effective_value_resolves_legacy_id() {
        let mut config = ConfigObject::new();
        config.insert("mongoUri".into(), json!("mongodb://db"));
        assert_eq!(
            effective_value(registry(), &config, "mongodbUri"),
            Some(json!("mongodb://db"))
        );
    }
}
