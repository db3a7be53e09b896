//! Canonicalizer: collapse historical field-id spellings.
//!
//! Configurations persisted by earlier tool versions can key values under
//! retired ids. Canonicalization moves each legacy-keyed value to the
//! canonical id, with the legacy value winning over any value already at the
//! canonical key (the legacy entry is the later writer in every migration we
//! have seen). Legacy keys are removed, so a second pass finds nothing to do.

use chatforge_fields::{ConfigObject, FieldRegistry};
use tracing::debug;

/// Rewrite legacy-keyed entries in place. Idempotent.
pub fn canonicalize(registry: &FieldRegistry, config: &mut ConfigObject) {
    let mut moved = 0usize;
    for field in registry.iter() {
        for legacy in field.legacy_ids {
            if let Some(value) = config.remove(*legacy) {
                config.insert(field.id.to_string(), value);
                moved += 1;
            }
        }
    }
    if moved > 0 {
        debug!(moved, "collapsed legacy field ids");
    }
}

/// Canonicalized copy, for callers that must not mutate their input.
pub fn canonicalized(registry: &FieldRegistry, config: &ConfigObject) -> ConfigObject {
    let mut copy = config.clone();
    canonicalize(registry, &mut copy);
    copy
}
