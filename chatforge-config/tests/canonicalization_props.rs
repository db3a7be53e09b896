//! Property tests for the canonicalizer and the import coercions.

use chatforge_config::{canonicalize, is_placeholder, map_env_to_configuration};
use chatforge_fields::{ConfigObject, FieldRegistry};
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;

fn registry() -> &'static FieldRegistry {
    FieldRegistry::builtin()
}

/// Every (legacy, canonical) id pair the built-in catalog declares.
fn legacy_pairs() -> Vec<(&'static str, &'static str)> {
    registry()
        .iter()
        .flat_map(|f| f.legacy_ids.iter().map(move |l| (*l, f.id)))
        .collect()
}

proptest! {
    #[test]
    fn canonicalization_is_idempotent(
        picks in prop::collection::vec((any::<prop::sample::Index>(), "[a-z0-9]{1,12}"), 0..8),
        canonical_too in any::<bool>(),
    ) {
        let pairs = legacy_pairs();
        prop_assume!(!pairs.is_empty());

        let mut config = ConfigObject::new();
        for (index, value) in &picks {
            let (legacy, canonical) = pairs[index.index(pairs.len())];
            config.insert(legacy.to_string(), json!(value));
            if canonical_too {
                config.insert(canonical.to_string(), json!("preexisting"));
            }
        }

        canonicalize(registry(), &mut config);
        let once = config.clone();
        canonicalize(registry(), &mut config);
        prop_assert_eq!(&config, &once);

        // No legacy key survives a single pass.
        for (legacy, _) in &pairs {
            prop_assert!(!once.contains_key(*legacy));
        }
    }

    #[test]
    fn legacy_value_always_wins_over_canonical(
        index in any::<prop::sample::Index>(),
        legacy_value in "[a-z0-9]{1,12}",
        canonical_value in "[A-Z0-9]{1,12}",
    ) {
        let pairs = legacy_pairs();
        prop_assume!(!pairs.is_empty());
        let (legacy, canonical) = pairs[index.index(pairs.len())];

        let mut config = ConfigObject::new();
        config.insert(canonical.to_string(), json!(canonical_value));
        config.insert(legacy.to_string(), json!(legacy_value.clone()));

        canonicalize(registry(), &mut config);
        prop_assert_eq!(config.get(canonical), Some(&json!(legacy_value)));
    }

    #[test]
    fn placeholder_detection_never_panics(raw in "\\PC*") {
        // Exercise arbitrary unicode input; only well-formed `${NAME}`
        // values may match.
        if is_placeholder(&raw) {
            let well_formed = raw.starts_with("${") && raw.ends_with('}');
            prop_assert!(well_formed);
        }
    }

    #[test]
    fn number_import_never_stores_non_numbers(raw in "\\PC{0,20}") {
        let mut vars = BTreeMap::new();
        vars.insert("PORT".to_string(), raw);
        let config = map_env_to_configuration(registry(), &vars);
        if let Some(value) = config.get("port") {
            prop_assert!(value.is_number(), "stored {value:?}");
        }
    }
}
