//! Named configuration profiles: the JSON envelope a configuration travels
//! in when saved, shared, or versioned.

use chatforge_fields::{ConfigObject, FieldCategory, FieldRegistry, OVERRIDES_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::Result;

/// A saved configuration with provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigProfile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub configuration: ConfigObject,
    pub metadata: ProfileMetadata,
    pub tool_version: String,
    pub created_at: DateTime<Utc>,
}

/// Summary statistics computed at save time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    pub field_count: usize,
    pub categories: Vec<String>,
}

impl ConfigProfile {
    /// Wrap a configuration in a profile envelope.
    pub fn new(registry: &FieldRegistry, name: impl Into<String>, config: ConfigObject) -> Self {
        let metadata = ProfileMetadata::compute(registry, &config);
        Self {
            name: name.into(),
            description: None,
            configuration: config,
            metadata,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl ProfileMetadata {
    fn compute(registry: &FieldRegistry, config: &ConfigObject) -> Self {
        let mut field_count = 0usize;
        let mut categories = BTreeSet::new();
        for key in config.keys() {
            if key == OVERRIDES_KEY {
                continue;
            }
            field_count += 1;
            if let Some(field) = registry.get_by_id(key) {
                categories.insert(field.category);
            }
        }
        Self {
            field_count,
            categories: categories
                .into_iter()
                .map(|c: FieldCategory| c.label().to_string())
                .collect(),
        }
    }
}
