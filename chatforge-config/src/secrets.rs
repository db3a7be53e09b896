//! Secret generation behind the [`SecretProvider`] seam.
//!
//! The platform requires four cryptographic values that operators almost
//! never set by hand. The ENV exporter needs them to be byte-stable across
//! repeated exports of the same named configuration (rotating them on every
//! export would invalidate live sessions), so generation lives behind a trait
//! and the default provider caches per configuration name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use rand::RngCore;
use tracing::debug;

/// The four generated secret values, hex-encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedSecrets {
    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    pub creds_key: String,
    pub creds_iv: String,
}

impl GeneratedSecrets {
    /// Generate a fresh set: 32 random bytes for the JWT secrets and the
    /// credentials key, 16 for the IV.
    pub fn generate() -> Self {
        Self {
            jwt_secret: random_hex(32),
            jwt_refresh_secret: random_hex(32),
            creds_key: random_hex(32),
            creds_iv: random_hex(16),
        }
    }

    /// The generated value for one of the four secret ENV keys.
    pub fn for_env_key(&self, env_key: &str) -> Option<&str> {
        match env_key {
            "JWT_SECRET" => Some(&self.jwt_secret),
            "JWT_REFRESH_SECRET" => Some(&self.jwt_refresh_secret),
            "CREDS_KEY" => Some(&self.creds_key),
            "CREDS_IV" => Some(&self.creds_iv),
            _ => None,
        }
    }
}

// Keeps secret material out of debug logs.
impl fmt::Debug for GeneratedSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedSecrets")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_refresh_secret", &"<redacted>")
            .field("creds_key", &"<redacted>")
            .field("creds_iv", &"<redacted>")
            .finish()
    }
}

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buf);
    let mut out = String::with_capacity(bytes * 2);
    for b in buf {
        use fmt::Write;
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Source of generated secrets for ENV export.
///
/// Implementations decide the stability policy; the exporter only asks for
/// the set belonging to a named configuration.
pub trait SecretProvider {
    fn secrets_for(&self, name: &str) -> GeneratedSecrets;
}

/// Default provider: one generated set per configuration name, cached for
/// the process lifetime so repeated exports emit identical bytes.
#[derive(Default)]
pub struct CachedSecretProvider {
    cache: Mutex<HashMap<String, GeneratedSecrets>>,
}

impl CachedSecretProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretProvider for CachedSecretProvider {
    fn secrets_for(&self, name: &str) -> GeneratedSecrets {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(secrets) = cache.get(name) {
            return secrets.clone();
        }
        debug!(name, "generating secrets for configuration");
        let secrets = GeneratedSecrets::generate();
        cache.insert(name.to_string(), secrets.clone());
        secrets
    }
}

/// Provider returning one fixed set regardless of name. Test double.
pub struct FixedSecretProvider(pub GeneratedSecrets);

impl SecretProvider for FixedSecretProvider {
    fn secrets_for(&self, _name: &str) -> GeneratedSecrets {
        self.0.clone()
    }
}
