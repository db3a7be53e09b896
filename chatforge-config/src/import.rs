//! Import mappers: validated ENV/YAML input into the configuration object.
//!
//! Mapping is deliberately softer than validation. Validation decides whether
//! an import is accepted at all; once accepted, the mappers coerce each raw
//! value toward its declared type and degrade per-field: an uncoercible value
//! falls back to the field's default (or is skipped when no default exists)
//! with a warning, never failing the whole import.
//!
//! Unresolved `${NAME}` placeholders are a YAML-only concern: the YAML export
//! writes them for secret fields, so the YAML mapper skips them on the way
//! back in rather than storing the reference as the secret itself. ENV values
//! carry no such convention and import verbatim.

use std::collections::BTreeMap;

use chatforge_fields::{ConfigObject, FieldDescriptor, FieldRegistry, FieldType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::address;
use crate::error::Result;

/// An entire value that is exactly one unresolved substitution reference.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$\{[A-Za-z_][A-Za-z0-9_]*\}$").expect("placeholder pattern is valid")
});

/// Whether a raw string is an unresolved `${NAME}` placeholder.
pub fn is_placeholder(raw: &str) -> bool {
    PLACEHOLDER.is_match(raw)
}

/// Parse YAML text into a JSON value tree.
///
/// Empty or whitespace-only text parses to `Null`, the same shape an empty
/// document produces, so callers treat "no file" and "empty file" alike.
pub fn parse_yaml_text(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml_ng::from_str(text)?)
}

/// Map validated ENV vars into a configuration object.
///
/// Each var is matched by ENV key, coerced toward the field's declared type,
/// and stored at the field's canonical internal address. Values import
/// verbatim, `${NAME}`-shaped strings included; unknown keys are skipped with
/// a warning (the validator has already rejected imports containing them).
pub fn map_env_to_configuration(
    registry: &FieldRegistry,
    vars: &BTreeMap<String, String>,
) -> ConfigObject {
    let mut config = ConfigObject::new();

    for (key, raw) in vars {
        let Some(field) = registry.get_by_env_key(key) else {
            warn!(key, "skipping ENV var with no registry mapping");
            continue;
        };
        if let Some(value) = coerce_env_value(field, raw) {
            address::store(field, &mut config, value);
        }
    }

    debug!(fields = config.len(), "mapped ENV input to configuration");
    config
}

/// Map a validated YAML document into a configuration object.
///
/// Walks the registry's YAML-addressed fields, extracting each value present
/// in the document. Explicit `null` is preserved as an explicit null (the
/// operator wrote the key out; that intent survives a round trip), which is
/// distinct from the key being absent.
pub fn map_yaml_to_configuration(registry: &FieldRegistry, yaml: &Value) -> ConfigObject {
    let mut config = ConfigObject::new();
    let Value::Object(root) = yaml else {
        return config;
    };

    for field in registry.yaml_fields() {
        let path = field.yaml_path.unwrap_or(field.id);
        let Some(value) = get_value_path(root, path) else {
            continue;
        };
        if let Value::String(s) = value {
            if is_placeholder(s) {
                debug!(path, "skipping unresolved placeholder value");
                continue;
            }
        }
        let value = match &field.yaml_transformer {
            Some(transform) => transform(value),
            None => coerce_yaml_value(field, value),
        };
        address::store(field, &mut config, value);
    }

    debug!(fields = config.len(), "mapped YAML input to configuration");
    config
}

fn get_value_path<'a>(root: &'a ConfigObject, path: &str) -> Option<&'a Value> {
    address::get_path(root, path)
}

/// Coerce a raw ENV string toward the field's declared type.
///
/// Returns `None` when the value cannot be represented and no default exists.
fn coerce_env_value(field: &FieldDescriptor, raw: &str) -> Option<Value> {
    if let Some(transform) = &field.env_transformer {
        return Some(transform(raw));
    }

    match field.field_type {
        // The platform's own loader treats anything but "true"/"1" as false.
        FieldType::Boolean => Some(Value::Bool(matches!(raw, "true" | "1"))),
        FieldType::Number => match parse_number(raw) {
            Some(n) => Some(n),
            None => fall_back(field, raw, "not a number"),
        },
        FieldType::Enum => {
            let allowed = field.enum_values.unwrap_or(&[]);
            if allowed.contains(&raw) {
                Some(Value::String(raw.to_string()))
            } else {
                fall_back(field, raw, "not an allowed enum value")
            }
        }
        FieldType::Array => {
            let items: Vec<Value> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect();
            Some(Value::Array(items))
        }
        FieldType::Object => match serde_json::from_str(raw) {
            Ok(value @ Value::Object(_)) => Some(value),
            _ => fall_back(field, raw, "not a JSON object"),
        },
        FieldType::String | FieldType::Url | FieldType::Email => {
            Some(Value::String(raw.to_string()))
        }
    }
}

/// Soft-coerce a YAML value toward the declared type.
///
/// YAML parsing already produces typed scalars, so this mostly passes values
/// through. Strings arriving where numbers or booleans are declared (quoted
/// scalars in hand-edited files) get one parse attempt before falling back.
fn coerce_yaml_value(field: &FieldDescriptor, value: &Value) -> Value {
    match (field.field_type, value) {
        (FieldType::Number, Value::String(s)) => match parse_number(s) {
            Some(n) => n,
            None => {
                warn!(id = field.id, raw = %s, "quoted YAML scalar is not a number, keeping as string");
                value.clone()
            }
        },
        (FieldType::Boolean, Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => value.clone(),
        },
        _ => value.clone(),
    }
}

/// Integer first, then finite float. Non-finite floats are unrepresentable
/// in JSON and count as unparseable.
fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Value::from(n));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::from)
}

fn fall_back(field: &FieldDescriptor, raw: &str, why: &str) -> Option<Value> {
    match &field.default {
        Some(default) => {
            warn!(id = field.id, raw, why, "uncoercible ENV value, using field default");
            Some(default.clone())
        }
        None => {
            warn!(id = field.id, raw, why, "uncoercible ENV value with no default, skipping");
            None
        }
    }
}
