//! ENV text generation.
//!
//! Output is grouped into banner-commented sections, one per category in
//! declared order. Explicitly set fields become live `KEY=value` lines;
//! everything else becomes a commented default (`# KEY=default`) so the file
//! documents every knob the platform understands without activating it.
//!
//! The four generated secrets are special-cased: an explicit value emits
//! live, an unset one emits the [`SecretProvider`]'s generated value as a
//! comment, discoverable but inert until the operator reviews it. The
//! default provider caches per configuration name, keeping repeated exports
//! byte-identical.

use chatforge_fields::{ConfigObject, FieldDescriptor, FieldRegistry};
use serde_json::Value;
use tracing::debug;

use crate::canonical;
use crate::export::format_env_value;
use crate::overrides;
use crate::secrets::SecretProvider;

/// Generate complete ENV text for a configuration.
pub fn generate_env_text(
    registry: &FieldRegistry,
    config: &ConfigObject,
    provider: &dyn SecretProvider,
    name: &str,
) -> String {
    let config = canonical::canonicalized(registry, config);
    let secrets = provider.secrets_for(name);

    let mut out = String::new();
    out.push_str("# LibreChat environment configuration\n");
    out.push_str("# Lines left commented keep the platform default.\n");

    let mut live = 0usize;
    for category in chatforge_fields::FieldCategory::ALL {
        let fields: Vec<&FieldDescriptor> = registry
            .iter()
            .filter(|f| f.category == category && f.is_env_exportable())
            .collect();
        if fields.is_empty() {
            continue;
        }

        out.push('\n');
        out.push_str(&format!("# ===== {} =====\n", category.label()));

        for field in fields {
            let env_key = field.env_key.unwrap_or(field.id);

            if field.secret && field.yaml_path.is_none() {
                if let Some(generated) = secrets.for_env_key(env_key) {
                    let explicit = explicit_value(registry, &config, field)
                        .map(|v| format_env_value(&v))
                        .filter(|s| !s.is_empty());
                    match explicit {
                        Some(value) => {
                            out.push_str(&format!("{env_key}={value}\n"));
                            live += 1;
                        }
                        // Never silently activate an unreviewed secret: the
                        // generated value is discoverable but stays inert
                        // until the operator sets it explicitly.
                        None => out.push_str(&format!(
                            "# {env_key}={generated} (auto-generated, set explicitly to export)\n"
                        )),
                    }
                    continue;
                }
            }

            match explicit_value(registry, &config, field) {
                Some(value) if !matches!(value, Value::Null) => {
                    let formatted = format_env_value(&value);
                    if formatted.is_empty() {
                        push_commented_default(&mut out, env_key, field);
                    } else {
                        out.push_str(&format!("{env_key}={formatted}\n"));
                        live += 1;
                    }
                }
                _ => push_commented_default(&mut out, env_key, field),
            }
        }
    }

    debug!(name, live, "generated ENV text");
    out
}

/// The stored value when the field is explicitly set and not inherit-marked.
fn explicit_value(
    registry: &FieldRegistry,
    config: &ConfigObject,
    field: &FieldDescriptor,
) -> Option<Value> {
    if !overrides::is_explicitly_set(registry, config, field.id) {
        return None;
    }
    crate::address::resolve(field, config).cloned()
}

fn push_commented_default(out: &mut String, env_key: &str, field: &FieldDescriptor) {
    let default = field
        .default
        .as_ref()
        .map(format_env_value)
        .unwrap_or_default();
    out.push_str(&format!("# {env_key}={default}\n"));
}
