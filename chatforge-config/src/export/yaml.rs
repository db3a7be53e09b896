//! YAML text generation (the platform's `librechat.yaml`).
//!
//! Sections are emitted in a fixed order and only when the operator has
//! explicitly set at least one field inside them; an all-defaults section
//! would change platform behavior just by existing (the platform treats a
//! present section as "configured"). Secret-bearing fields never emit their
//! value: the YAML side gets a `${ENV_KEY}` substitution placeholder and the
//! value itself travels in the ENV export.

use chatforge_fields::{ConfigObject, FieldDescriptor, FieldRegistry};
use serde_json::Value;
use serde_yaml_ng::{Mapping, Value as Yaml};
use tracing::debug;

use crate::address;
use crate::canonical;
use crate::error::Result;
use crate::overrides;

/// Top-level YAML keys in output order.
const SECTION_ORDER: [&str; 14] = [
    "version",
    "cache",
    "interface",
    "registration",
    "endpoints",
    "modelSpecs",
    "fileConfig",
    "rateLimits",
    "memory",
    "webSearch",
    "ocr",
    "speech",
    "actions",
    "mcpServers",
];

/// Generate YAML text for a configuration. Empty string when no section
/// qualifies. No file is better than a file that flips platform behavior.
pub fn generate_yaml_text(registry: &FieldRegistry, config: &ConfigObject) -> Result<String> {
    let config = canonical::canonicalized(registry, config);

    let mut gated: Vec<&str> = Vec::new();
    for section in SECTION_ORDER {
        if section == "version" || section == "cache" {
            continue;
        }
        let open = registry
            .yaml_fields()
            .filter(|f| top_segment(f) == Some(section))
            .any(|f| opens_section(registry, &config, f));
        if open {
            gated.push(section);
        }
    }

    let version_open = registry
        .get_by_id("configVersion")
        .is_some_and(|f| opens_section(registry, &config, f));
    let cache_open = registry
        .get_by_id("cache")
        .is_some_and(|f| opens_section(registry, &config, f));
    if gated.is_empty() && !version_open && !cache_open {
        return Ok(String::new());
    }

    let mut root = Mapping::new();

    // The envelope scalars ride along whenever any section is present.
    for id in ["configVersion", "cache"] {
        if let Some(value) = overrides::effective_value(registry, &config, id) {
            if let Some(field) = registry.get_by_id(id) {
                if let Some(path) = field.yaml_path {
                    insert_path(&mut root, path, to_yaml(&value)?);
                }
            }
        }
    }

    for section in SECTION_ORDER {
        if !gated.contains(&section) {
            continue;
        }
        for field in registry.yaml_fields() {
            if top_segment(field) != Some(section) || !field.is_yaml_exportable() {
                continue;
            }
            if !overrides::is_explicitly_set(registry, &config, field.id) {
                continue;
            }
            let Some(value) = address::resolve(field, &config) else {
                continue;
            };
            let yaml_value = if field.secret {
                // The value travels via ENV; YAML only carries the reference.
                match field.env_key {
                    Some(env_key) => Yaml::String(format!("${{{env_key}}}")),
                    None => to_yaml(value)?,
                }
            } else {
                to_yaml(value)?
            };
            let path = export_path(registry, &config, field);
            insert_path(&mut root, &path, yaml_value);
        }
    }

    debug!(sections = gated.len(), "generated YAML text");
    let body = serde_yaml_ng::to_string(&Yaml::Mapping(root))?;
    Ok(format!("# LibreChat configuration\n{body}"))
}

/// Whether a field's stored value justifies emitting its whole section.
///
/// Only a non-default, non-empty explicit value opens a section: a stanza
/// holding nothing but defaults would change platform behavior just by being
/// present. Explicit null qualifies: it is the operator clearing a field,
/// and dropping it would break the round trip.
fn opens_section(registry: &FieldRegistry, config: &ConfigObject, field: &FieldDescriptor) -> bool {
    if !overrides::is_explicitly_set(registry, config, field.id) {
        return false;
    }
    let Some(value) = address::resolve(field, config) else {
        return false;
    };
    if Some(value) == field.default.as_ref() {
        return false;
    }
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

fn top_segment(field: &FieldDescriptor) -> Option<&'static str> {
    field
        .yaml_path
        .map(|p| p.split_once('.').map_or(p, |(head, _)| head))
}

/// The path to emit, with the provider segment of speech paths rewritten to
/// the configured STT/TTS provider.
fn export_path(registry: &FieldRegistry, config: &ConfigObject, field: &FieldDescriptor) -> String {
    let path = field.yaml_path.unwrap_or(field.id);
    let provider_id = if path.starts_with("speech.stt.") {
        "speechSttProvider"
    } else if path.starts_with("speech.tts.") {
        "speechTtsProvider"
    } else {
        return path.to_string();
    };

    let provider = overrides::effective_value(registry, config, provider_id)
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "openai".to_string());

    let mut parts: Vec<&str> = path.split('.').collect();
    if parts.len() >= 3 {
        parts[2] = &provider;
        return parts.join(".");
    }
    path.to_string()
}

fn insert_path(root: &mut Mapping, path: &str, value: Yaml) {
    let parts: Vec<&str> = path.split('.').collect();
    let mut current = root;
    for part in &parts[..parts.len() - 1] {
        let key = Yaml::String((*part).to_string());
        let entry = current
            .entry(key)
            .or_insert_with(|| Yaml::Mapping(Mapping::new()));
        if !entry.is_mapping() {
            *entry = Yaml::Mapping(Mapping::new());
        }
        match entry {
            Yaml::Mapping(nested) => current = nested,
            _ => unreachable!("entry was just coerced to a mapping"),
        }
    }
    if let Some(last) = parts.last() {
        current.insert(Yaml::String((*last).to_string()), value);
    }
}

fn to_yaml(value: &Value) -> Result<Yaml> {
    Ok(serde_yaml_ng::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatforge_fields::FieldRegistry;
    use serde_json::json;

    fn registry() -> &'static FieldRegistry {
        FieldRegistry::builtin()
    }

    fn generate(config: &ConfigObject) -> String {
        generate_yaml_text(registry(), config).unwrap()
    }

    #[test]
    fn empty_configuration_yields_empty_text() {
        assert_eq!(generate(&ConfigObject::new()), "");
    }

    #[test]
    fn all_default_sections_stay_closed() {
        // A stored-but-inherit-marked field must not open its section.
        let mut config = ConfigObject::new();
        config.insert("customWelcome".into(), json!("Hi"));
        overrides::set_field_override(&mut config, "customWelcome", true);
        assert_eq!(generate(&config), "");
    }

    #[test]
    fn explicit_field_opens_its_section_with_envelope() {
        let mut config = ConfigObject::new();
        config.insert("customWelcome".into(), json!("Welcome, friends!"));
        let text = generate(&config);

        assert!(text.contains("version: 1.2.8"));
        assert!(text.contains("cache: true"));
        assert!(text.contains("interface:"));
        assert!(text.contains("customWelcome: Welcome, friends!"));
        // Sibling interface defaults stay out of the file.
        assert!(!text.contains("endpointsMenu"));
    }

    #[test]
    fn default_valued_field_does_not_open_a_section() {
        // endpointsMenu's default is true; setting it to true changes nothing.
        let mut config = ConfigObject::new();
        config.insert("endpointsMenu".into(), json!(true));
        assert_eq!(generate(&config), "");

        // But once a sibling opens the section, the explicit value rides along.
        config.insert("customWelcome".into(), json!("Hi"));
        let text = generate(&config);
        assert!(text.contains("endpointsMenu: true"));
    }

    #[test]
    fn empty_string_does_not_open_a_section() {
        let mut config = ConfigObject::new();
        config.insert("customWelcome".into(), json!(""));
        assert_eq!(generate(&config), "");
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let mut config = ConfigObject::new();
        config.insert("customWelcome".into(), json!("Hi"));
        config.insert("memoryTokenLimit".into(), json!(4000));
        config.insert("mcpServers".into(), json!({"everything": {"command": "npx"}}));
        let text = generate(&config);

        let interface = text.find("interface:").unwrap();
        let memory = text.find("memory:").unwrap();
        let mcp = text.find("mcpServers:").unwrap();
        assert!(interface < memory);
        assert!(memory < mcp);
    }

    #[test]
    fn secret_fields_emit_placeholders() {
        let mut config = ConfigObject::new();
        config.insert("serperApiKey".into(), json!("real-secret-value"));
        let text = generate(&config);

        assert!(text.contains("webSearch:"));
        assert!(text.contains("serperApiKey: ${SERPER_API_KEY}"));
        assert!(!text.contains("real-secret-value"));
    }

    #[test]
    fn explicit_null_survives_export() {
        let mut config = ConfigObject::new();
        config.insert("customWelcome".into(), Value::Null);
        let text = generate(&config);
        assert!(text.contains("customWelcome: null"));
    }

    #[test]
    fn config_path_fields_export_to_their_yaml_nesting() {
        let mut config = ConfigObject::new();
        config.insert("privacyPolicyUrl".into(), json!("https://example.com/privacy"));
        let text = generate(&config);

        assert!(text.contains("privacyPolicy:"));
        assert!(text.contains("externalUrl: https://example.com/privacy"));
        assert!(!text.contains("privacyPolicyUrl:"));
    }

    #[test]
    fn speech_paths_follow_configured_provider() {
        let mut config = ConfigObject::new();
        config.insert("speechSttProvider".into(), json!("azure"));
        config.insert("speechSttModel".into(), json!("whisper-large"));
        let text = generate(&config);

        assert!(text.contains("speech:"));
        assert!(text.contains("azure:"));
        assert!(text.contains("model: whisper-large"));
        assert!(!text.contains("openai:"));
    }

    #[test]
    fn mcp_servers_object_exported_whole() {
        let mut config = ConfigObject::new();
        config.insert(
            "mcpServers".into(),
            json!({"everything": {"command": "npx", "args": ["-y", "mcp"]}}),
        );
        let text = generate(&config);

        assert!(text.contains("mcpServers:"));
        assert!(text.contains("everything:"));
        assert!(text.contains("command: npx"));
    }

    #[test]
    fn env_only_fields_never_appear() {
        let mut config = ConfigObject::new();
        config.insert("port".into(), json!(8080));
        config.insert("customWelcome".into(), json!("Hi"));
        let text = generate(&config);
        assert!(!text.contains("port"));
        assert!(!text.contains("8080"));
    }

    #[test]
    fn repeated_export_is_byte_identical() {
        let mut config = ConfigObject::new();
        config.insert("customWelcome".into(), json!("Hi"));
        config.insert("memoryTokenLimit".into(), json!(4000));
        assert_eq!(generate(&config), generate(&config));
    }
}
