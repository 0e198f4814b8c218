//! Key material resolution.
//!
//! Keys are looked up at the moment of use so a rotated key takes effect
//! without a process restart. `ENCRYPTION_KEY_V{N}` overrides
//! `ENCRYPTION_KEY` for version `N`.

use std::collections::HashMap;
use std::env;

use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::types::{AES_KEY_LENGTH, ENCRYPTION_KEY_VAR};

/// 32-byte key material, wiped on drop.
pub type KeyMaterial = Zeroizing<[u8; AES_KEY_LENGTH]>;

/// Source of versioned key material.
///
/// Injected into [`crate::SecretCrypto`] so callers control where keys come
/// from and tests never have to mutate process-wide state.
pub trait KeyResolver {
    /// Resolve the 32-byte key for `version`.
    fn resolve(&self, version: u32) -> Result<KeyMaterial, CryptoError>;
}

/// Resolver backed by process environment variables.
///
/// Looks up `ENCRYPTION_KEY_V{N}` first, then falls back to
/// `ENCRYPTION_KEY`. The environment is read on every call; nothing is
/// cached.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvKeyResolver;

impl EnvKeyResolver {
    pub fn new() -> Self {
        EnvKeyResolver
    }
}

impl KeyResolver for EnvKeyResolver {
    fn resolve(&self, version: u32) -> Result<KeyMaterial, CryptoError> {
        let versioned = format!("{}_V{}", ENCRYPTION_KEY_VAR, version);
        let (variable, value) = match env::var(&versioned) {
            Ok(value) => (versioned, value),
            Err(_) => match env::var(ENCRYPTION_KEY_VAR) {
                Ok(value) => (ENCRYPTION_KEY_VAR.to_string(), value),
                Err(_) => {
                    return Err(CryptoError::KeyNotSet {
                        variable: ENCRYPTION_KEY_VAR.to_string(),
                    })
                }
            },
        };
        decode_key(&variable, &value)
    }
}

/// Decode and validate hex key material from a configuration value.
fn decode_key(variable: &str, value: &str) -> Result<KeyMaterial, CryptoError> {
    let bytes = Zeroizing::new(hex::decode(value.trim()).map_err(|e| {
        CryptoError::InvalidKeyEncoding {
            variable: variable.to_string(),
            detail: e.to_string(),
        }
    })?);
    if bytes.len() != AES_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_KEY_LENGTH,
            got: bytes.len(),
        });
    }
    let mut key = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// Fixed in-memory key table, for tests and for embedders that source keys
/// from somewhere other than the environment.
#[derive(Debug, Default)]
pub struct StaticKeyResolver {
    keys: HashMap<u32, [u8; AES_KEY_LENGTH]>,
}

impl StaticKeyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key for `version`, replacing any existing entry.
    pub fn with_key(mut self, version: u32, key: [u8; AES_KEY_LENGTH]) -> Self {
        self.keys.insert(version, key);
        self
    }
}

impl KeyResolver for StaticKeyResolver {
    fn resolve(&self, version: u32) -> Result<KeyMaterial, CryptoError> {
        self.keys
            .get(&version)
            .map(|key| Zeroizing::new(*key))
            .ok_or(CryptoError::KeyNotConfigured(version))
    }
}
