//! AddressResolver: the single home for the three storage strategies.
//!
//! A field's value can live at its `config_path` (structural translation),
//! at its `yaml_path` (nested, mirroring the external file), or directly at
//! its `id`. Every mapper and exporter resolves and stores values through
//! this module instead of repeating the fallback chain at each call site.

use chatforge_fields::{ConfigObject, FieldDescriptor};
use serde_json::Value;

/// Navigate a dot-notated path through nested maps.
pub fn get_path<'a>(config: &'a ConfigObject, path: &str) -> Option<&'a Value> {
    if !path.contains('.') {
        return config.get(path);
    }
    let parts: Vec<&str> = path.split('.').collect();
    let mut current = config;
    for part in &parts[..parts.len() - 1] {
        match current.get(*part) {
            Some(Value::Object(nested)) => current = nested,
            _ => return None,
        }
    }
    parts.last().and_then(|last| current.get(*last))
}

/// Store a value at a dot-notated path, creating intermediate objects.
///
/// A non-object value sitting where an intermediate container is needed is
/// replaced by an object; the nested address wins.
pub fn set_path(config: &mut ConfigObject, path: &str, value: Value) {
    if !path.contains('.') {
        config.insert(path.to_string(), value);
        return;
    }
    let parts: Vec<&str> = path.split('.').collect();
    let mut current = config;
    for part in &parts[..parts.len() - 1] {
        let entry = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(ConfigObject::new()));
        if !entry.is_object() {
            *entry = Value::Object(ConfigObject::new());
        }
        match entry {
            Value::Object(nested) => current = nested,
            _ => unreachable!("entry was just coerced to an object"),
        }
    }
    if let Some(last) = parts.last() {
        current.insert((*last).to_string(), value);
    }
}

/// Resolve a field's stored value: `config_path`, then `yaml_path`, then
/// the bare `id`, first hit wins.
pub fn resolve<'a>(field: &FieldDescriptor, config: &'a ConfigObject) -> Option<&'a Value> {
    if let Some(config_path) = field.config_path {
        if let Some(value) = get_path(config, config_path) {
            return Some(value);
        }
    }
    if let Some(yaml_path) = field.yaml_path {
        if let Some(value) = get_path(config, yaml_path) {
            return Some(value);
        }
    }
    config.get(field.id)
}

/// Store a field's value at its canonical internal address
/// (`config_path` when defined, otherwise the bare `id`).
pub fn store(field: &FieldDescriptor, config: &mut ConfigObject, value: Value) {
    set_path(config, field.storage_path(), value);
}
