//! Core descriptor types for the field registry.
//!
//! A [`FieldDescriptor`] is the complete schema record for one logical
//! setting of the managed chat platform: its stable id, its external
//! addresses (ENV key and/or YAML dot-path), its value type, default, and
//! export behavior. Descriptors are built with a terse builder chain so the
//! catalog stays one expression per field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The configuration object the engine produces and consumes: a mapping from
/// field id (or nested path) to typed JSON value.
pub type ConfigObject = serde_json::Map<String, Value>;

/// Reserved top-level key inside a [`ConfigObject`] holding the per-field
/// override map (`id -> bool`). Never a field id; exporters skip it.
pub const OVERRIDES_KEY: &str = "fieldOverrides";

/// Custom coercion from a raw ENV string into a typed value.
pub type EnvTransformer = fn(&str) -> Value;

/// Custom coercion applied to a value extracted from parsed YAML.
pub type YamlTransformer = fn(&Value) -> Value;

/// The value type of a field. Drives default coercion and export formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Boolean,
    Number,
    Array,
    Object,
    Enum,
    Url,
    Email,
}

/// Grouping category for a field.
///
/// Variant declaration order IS the ENV export order: the exporter emits one
/// banner-commented section per category, walking [`FieldCategory::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldCategory {
    App,
    Server,
    Security,
    Database,
    AiProviders,
    Oauth,
    Email,
    FileStorage,
    Search,
    RateLimit,
    Interface,
    Registration,
    Moderation,
    WebSearch,
    Ocr,
    Speech,
    Actions,
    Mcp,
    ModelSpecs,
    FileConfig,
    Memory,
    Endpoints,
    Misc,
}

impl FieldCategory {
    /// Every category, in declared export order.
    pub const ALL: [FieldCategory; 23] = [
        FieldCategory::App,
        FieldCategory::Server,
        FieldCategory::Security,
        FieldCategory::Database,
        FieldCategory::AiProviders,
        FieldCategory::Oauth,
        FieldCategory::Email,
        FieldCategory::FileStorage,
        FieldCategory::Search,
        FieldCategory::RateLimit,
        FieldCategory::Interface,
        FieldCategory::Registration,
        FieldCategory::Moderation,
        FieldCategory::WebSearch,
        FieldCategory::Ocr,
        FieldCategory::Speech,
        FieldCategory::Actions,
        FieldCategory::Mcp,
        FieldCategory::ModelSpecs,
        FieldCategory::FileConfig,
        FieldCategory::Memory,
        FieldCategory::Endpoints,
        FieldCategory::Misc,
    ];

    /// Banner label used in ENV export section comments.
    pub fn label(&self) -> &'static str {
        match self {
            FieldCategory::App => "app",
            FieldCategory::Server => "server",
            FieldCategory::Security => "security",
            FieldCategory::Database => "database",
            FieldCategory::AiProviders => "ai-providers",
            FieldCategory::Oauth => "oauth",
            FieldCategory::Email => "email",
            FieldCategory::FileStorage => "file-storage",
            FieldCategory::Search => "search",
            FieldCategory::RateLimit => "rate-limit",
            FieldCategory::Interface => "interface",
            FieldCategory::Registration => "registration",
            FieldCategory::Moderation => "moderation",
            FieldCategory::WebSearch => "web-search",
            FieldCategory::Ocr => "ocr",
            FieldCategory::Speech => "speech",
            FieldCategory::Actions => "actions",
            FieldCategory::Mcp => "mcp",
            FieldCategory::ModelSpecs => "model-specs",
            FieldCategory::FileConfig => "file-config",
            FieldCategory::Memory => "memory",
            FieldCategory::Endpoints => "endpoints",
            FieldCategory::Misc => "misc",
        }
    }
}

/// The complete schema record for a single logical setting.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Unique, stable identifier. The configuration object's key.
    pub id: &'static str,
    /// Name used in ENV text, unique among fields that define it.
    pub env_key: Option<&'static str>,
    /// Dot-separated address in YAML text, unique among fields that define it.
    pub yaml_path: Option<&'static str>,
    /// Alternate dot-address used for internal storage when it differs
    /// structurally from the external YAML location.
    pub config_path: Option<&'static str>,
    pub field_type: FieldType,
    pub default: Option<Value>,
    pub category: FieldCategory,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub enum_values: Option<&'static [&'static str]>,
    /// Secret-bearing: value lives in ENV, YAML only ever sees a `${KEY}`
    /// placeholder.
    pub secret: bool,
    pub export_to_env: bool,
    pub export_to_yaml: bool,
    /// Deliberate, documented violation of the single-export-channel
    /// invariant, working around a defect in the consuming platform.
    pub librechat_bug_exception: bool,
    /// Historical id spellings collapsed by the canonicalizer.
    pub legacy_ids: &'static [&'static str],
    pub env_transformer: Option<EnvTransformer>,
    pub yaml_transformer: Option<YamlTransformer>,
}

impl FieldDescriptor {
    pub fn new(id: &'static str, field_type: FieldType, category: FieldCategory) -> Self {
        Self {
            id,
            env_key: None,
            yaml_path: None,
            config_path: None,
            field_type,
            default: None,
            category,
            min: None,
            max: None,
            enum_values: None,
            secret: false,
            export_to_env: true,
            export_to_yaml: true,
            librechat_bug_exception: false,
            legacy_ids: &[],
            env_transformer: None,
            yaml_transformer: None,
        }
    }

    pub fn env(mut self, key: &'static str) -> Self {
        self.env_key = Some(key);
        self
    }

    pub fn yaml(mut self, path: &'static str) -> Self {
        self.yaml_path = Some(path);
        self
    }

    pub fn config_path(mut self, path: &'static str) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn enum_of(mut self, values: &'static [&'static str]) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn no_env_export(mut self) -> Self {
        self.export_to_env = false;
        self
    }

    pub fn no_yaml_export(mut self) -> Self {
        self.export_to_yaml = false;
        self
    }

    pub fn bug_exception(mut self) -> Self {
        self.librechat_bug_exception = true;
        self
    }

    pub fn legacy(mut self, ids: &'static [&'static str]) -> Self {
        self.legacy_ids = ids;
        self
    }

    pub fn env_transform(mut self, f: EnvTransformer) -> Self {
        self.env_transformer = Some(f);
        self
    }

    pub fn yaml_transform(mut self, f: YamlTransformer) -> Self {
        self.yaml_transformer = Some(f);
        self
    }

    /// Whether this field may appear in ENV export output.
    ///
    /// A field's value has exactly one canonical output channel: defining a
    /// YAML path disqualifies it from ENV export unless the registry marks a
    /// deliberate bug exception.
    pub fn is_env_exportable(&self) -> bool {
        self.env_key.is_some()
            && self.export_to_env
            && (self.yaml_path.is_none() || self.librechat_bug_exception)
    }

    /// Whether this field may appear in YAML export output.
    pub fn is_yaml_exportable(&self) -> bool {
        self.yaml_path.is_some() && self.export_to_yaml
    }

    /// Where the value is stored inside the configuration object.
    pub fn storage_path(&self) -> &'static str {
        self.config_path.unwrap_or(self.id)
    }
}
