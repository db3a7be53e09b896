//! Structural validation of raw ENV/YAML input against the registry.
//!
//! Validation is strict and all-or-nothing: any unmapped key or path, or any
//! ENV key whose field travels via YAML, rejects the entire import with an
//! enumerated list of offenders. A partial import would silently drop fields
//! the operator believed they were importing; that is a data-loss bug class,
//! never tolerated.
//!
//! The validator never mutates and never throws; invalidity is data. Mapping
//! (see `import`) is only ever applied to input this module accepted.

use std::collections::BTreeMap;

use chatforge_fields::FieldRegistry;
use serde_json::Value;
use tracing::debug;

/// An ENV key that must travel via YAML instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlOnlyVar {
    pub env_key: String,
    pub yaml_path: String,
}

/// Outcome of ENV validation.
#[derive(Debug, Clone, Default)]
pub struct EnvValidation {
    pub valid: bool,
    pub unmapped_vars: Vec<String>,
    pub yaml_only_vars: Vec<YamlOnlyVar>,
}

/// Outcome of YAML validation.
#[derive(Debug, Clone, Default)]
pub struct YamlValidation {
    pub valid: bool,
    pub unmapped_fields: Vec<String>,
}

/// Check every ENV key against the registry.
///
/// Unknown keys are collected as `unmapped_vars`; keys whose field defines a
/// YAML path (and is not a bug exception) are collected as `yaml_only_vars`.
pub fn validate_env_vars(
    registry: &FieldRegistry,
    vars: &BTreeMap<String, String>,
) -> EnvValidation {
    let mut unmapped_vars = Vec::new();
    let mut yaml_only_vars = Vec::new();

    for key in vars.keys() {
        match registry.get_by_env_key(key) {
            None => unmapped_vars.push(key.clone()),
            Some(field) => {
                if let Some(yaml_path) = field.yaml_path {
                    if !field.librechat_bug_exception {
                        yaml_only_vars.push(YamlOnlyVar {
                            env_key: key.clone(),
                            yaml_path: yaml_path.to_string(),
                        });
                    }
                }
            }
        }
    }

    let valid = unmapped_vars.is_empty() && yaml_only_vars.is_empty();
    debug!(
        vars = vars.len(),
        unmapped = unmapped_vars.len(),
        yaml_only = yaml_only_vars.len(),
        valid,
        "validated ENV input"
    );

    EnvValidation {
        valid,
        unmapped_vars,
        yaml_only_vars,
    }
}

/// Recursively check every leaf path of a parsed YAML document.
///
/// A path with an exact registry match is valid (recursion stops there, so
/// object-typed fields like `mcpServers` accept arbitrary children). An
/// object node with no direct match is assumed to be an intermediate
/// container and its children are walked. Everything else is unmapped.
pub fn validate_yaml_fields(registry: &FieldRegistry, yaml: &Value) -> YamlValidation {
    let mut unmapped_fields = Vec::new();

    match yaml {
        Value::Null => {}
        Value::Object(map) => {
            for (key, value) in map {
                walk(registry, key.clone(), value, &mut unmapped_fields);
            }
        }
        _ => unmapped_fields.push("<root>".to_string()),
    }

    let valid = unmapped_fields.is_empty();
    debug!(unmapped = unmapped_fields.len(), valid, "validated YAML input");

    YamlValidation {
        valid,
        unmapped_fields,
    }
}

fn walk(registry: &FieldRegistry, path: String, value: &Value, unmapped: &mut Vec<String>) {
    if registry.get_by_yaml_path(&path).is_some() {
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                walk(registry, format!("{path}.{key}"), child, unmapped);
            }
        }
        _ => unmapped.push(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatforge_fields::FieldRegistry;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn known_env_keys_are_valid() {
        let result = validate_env_vars(
            FieldRegistry::builtin(),
            &env(&[("PORT", "3080"), ("OPENAI_API_KEY", "sk-test")]),
        );
        assert!(result.valid);
        assert!(result.unmapped_vars.is_empty());
        assert!(result.yaml_only_vars.is_empty());
    }

    #[test]
    fn unknown_env_key_rejects_whole_import() {
        let result = validate_env_vars(
            FieldRegistry::builtin(),
            &env(&[("PORT", "3080"), ("TOTALLY_UNKNOWN", "x")]),
        );
        assert!(!result.valid);
        assert_eq!(result.unmapped_vars, vec!["TOTALLY_UNKNOWN"]);
    }

    #[test]
    fn yaml_addressed_env_key_redirects_to_yaml() {
        use chatforge_fields::{FieldCategory, FieldDescriptor, FieldType};
        let registry = FieldRegistry::new(vec![FieldDescriptor::new(
            "customWelcome",
            FieldType::String,
            FieldCategory::Interface,
        )
        .env("CUSTOM_WELCOME")
        .yaml("interface.customWelcome")])
        .unwrap();

        let result = validate_env_vars(&registry, &env(&[("CUSTOM_WELCOME", "Hi")]));
        assert!(!result.valid);
        assert_eq!(
            result.yaml_only_vars,
            vec![YamlOnlyVar {
                env_key: "CUSTOM_WELCOME".to_string(),
                yaml_path: "interface.customWelcome".to_string(),
            }]
        );
    }

    #[test]
    fn bug_exception_keys_pass_env_validation() {
        // OCR_API_KEY has a YAML path but carries the documented exception.
        let result = validate_env_vars(FieldRegistry::builtin(), &env(&[("OCR_API_KEY", "k")]));
        assert!(result.valid, "{:?}", result.yaml_only_vars);
    }

    #[test]
    fn yaml_unknown_leaf_reported_with_full_path() {
        let result = validate_yaml_fields(
            FieldRegistry::builtin(),
            &json!({"unknownThing": 1}),
        );
        assert!(!result.valid);
        assert_eq!(result.unmapped_fields, vec!["unknownThing"]);
    }

    #[test]
    fn yaml_nested_unknown_leaf_reported() {
        let result = validate_yaml_fields(
            FieldRegistry::builtin(),
            &json!({"interface": {"customWelcome": "Hi", "nope": true}}),
        );
        assert!(!result.valid);
        assert_eq!(result.unmapped_fields, vec!["interface.nope"]);
    }

    #[test]
    fn object_typed_field_stops_recursion() {
        let result = validate_yaml_fields(
            FieldRegistry::builtin(),
            &json!({"mcpServers": {"everything": {"type": "stdio", "command": "npx"}}}),
        );
        assert!(result.valid, "{:?}", result.unmapped_fields);
    }

    #[test]
    fn empty_yaml_document_is_valid() {
        assert!(validate_yaml_fields(FieldRegistry::builtin(), &Value::Null).valid);
        assert!(validate_yaml_fields(FieldRegistry::builtin(), &json!({})).valid);
    }

    #[test]
    fn scalar_root_is_invalid() {
        let result = validate_yaml_fields(FieldRegistry::builtin(), &json!("just a string"));
        assert!(!result.valid);
        assert_eq!(result.unmapped_fields, vec!["<root>"]);
    }

    #[test]
    fn all_offenders_accumulated_not_just_first() {
        let result = validate_yaml_fields(
            FieldRegistry::builtin(),
            &json!({"bad1": 1, "interface": {"bad2": 2}, "memory": {"tokenLimit": 5}}),
        );
        assert!(!result.valid);
        assert_eq!(result.unmapped_fields.len(), 2);
        assert!(result.unmapped_fields.contains(&"bad1".to_string()));
        assert!(result.unmapped_fields.contains(&"interface.bad2".to_string()));
    }
}
