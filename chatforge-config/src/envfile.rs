//! ENV text parsing.
//!
//! Lines of `KEY=value`; blank lines and `#`-prefixed lines ignored. Values
//! keep embedded `=` signs; one level of matching surrounding quotes is
//! stripped, matching how the platform's own loader reads the file.

use std::collections::BTreeMap;

use tracing::trace;

/// Parse ENV text into an ordered key → raw-string map.
pub fn parse_env_text(text: &str) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            trace!(line, "skipping ENV line without '='");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        vars.insert(key.to_string(), unquote(value.trim()).to_string());
    }
    vars
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
