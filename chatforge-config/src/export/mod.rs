//! Export generators: configuration objects back out to ENV and YAML text.
//!
//! Both generators walk the registry (never the configuration's own key
//! order), so output ordering is fully determined by the catalog and repeated
//! exports of the same configuration are byte-identical.

mod env;
mod yaml;

pub use env::generate_env_text;
pub use yaml::generate_yaml_text;

use serde_json::Value;

/// Render a typed value as ENV text.
///
/// Arrays become comma-joined lists (the platform's own convention), objects
/// become compact JSON. Null renders empty, callers comment those lines out.
pub(crate) fn format_env_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_scalars_and_arrays() {
        assert_eq!(format_env_value(&json!(true)), "true");
        assert_eq!(format_env_value(&json!(3080)), "3080");
        assert_eq!(format_env_value(&json!("hello")), "hello");
        assert_eq!(format_env_value(&json!(["a", "b", "c"])), "a,b,c");
        assert_eq!(format_env_value(&Value::Null), "");
    }

    #[test]
    fn formats_objects_as_compact_json() {
        assert_eq!(format_env_value(&json!({"k": 1})), "{\"k\":1}");
    }
}
