//! Envelope encryption for stored secrets.
//!
//! [`SecretCrypto`] turns a plaintext API key into a versioned envelope
//! string and back. Key material comes from an injected [`KeyResolver`];
//! [`SecretCrypto::from_env`] wires in the environment-backed one.

use crate::algorithm::{Algorithm, CURRENT_ALGORITHM};
use crate::envelope::{encode_envelope, parse_envelope};
use crate::error::CryptoError;
use crate::keys::{EnvKeyResolver, KeyResolver};
use crate::types::CURRENT_KEY_VERSION;

pub struct SecretCrypto<R = EnvKeyResolver> {
    resolver: R,
}

impl SecretCrypto<EnvKeyResolver> {
    /// Helper backed by process environment configuration. The environment
    /// is re-read on every operation, so key rotation takes effect without
    /// a restart.
    pub fn from_env() -> Self {
        SecretCrypto {
            resolver: EnvKeyResolver::new(),
        }
    }
}

impl<R: KeyResolver> SecretCrypto<R> {
    pub fn new(resolver: R) -> Self {
        SecretCrypto { resolver }
    }

    /// Encrypt under the current key version and algorithm.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        self.encrypt_with(plaintext, CURRENT_KEY_VERSION, CURRENT_ALGORITHM)
    }

    /// Encrypt under an explicit key version and algorithm.
    pub fn encrypt_with(
        &self,
        plaintext: &str,
        version: u32,
        algorithm: Algorithm,
    ) -> Result<String, CryptoError> {
        self.encrypt_inner(plaintext, version, algorithm)
            .map_err(|e| CryptoError::Encryption(Box::new(e)))
    }

    fn encrypt_inner(
        &self,
        plaintext: &str,
        version: u32,
        algorithm: Algorithm,
    ) -> Result<String, CryptoError> {
        let key = self.resolver.resolve(version)?;
        let (iv, ciphertext, tag) = algorithm.seal(&key, plaintext.as_bytes())?;
        Ok(encode_envelope(version, algorithm, &iv, &tag, &ciphertext))
    }

    /// Decrypt an envelope in any supported form, selecting the key and
    /// cipher from the header. Returns the plaintext byte-for-byte as it
    /// was passed to `encrypt`.
    pub fn decrypt(&self, envelope: &str) -> Result<String, CryptoError> {
        self.decrypt_inner(envelope)
            .map_err(|e| CryptoError::Decryption(Box::new(e)))
    }

    fn decrypt_inner(&self, envelope: &str) -> Result<String, CryptoError> {
        let parsed = parse_envelope(envelope)?;
        let algorithm = Algorithm::from_id(parsed.format.algorithm_id())?;
        let key = self.resolver.resolve(parsed.format.key_version())?;
        if parsed.iv.len() != algorithm.iv_length() {
            return Err(CryptoError::InvalidIvLength {
                expected: algorithm.iv_length(),
                got: parsed.iv.len(),
            });
        }
        if parsed.auth_tag.len() != algorithm.tag_length() {
            return Err(CryptoError::InvalidTagLength {
                expected: algorithm.tag_length(),
                got: parsed.auth_tag.len(),
            });
        }
        let plaintext = algorithm.open(&key, &parsed.iv, &parsed.auth_tag, &parsed.ciphertext)?;
        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }

    /// Decrypt an envelope and re-encrypt it under the current key version
    /// and algorithm. Used to migrate stored rows forward after a rotation.
    pub fn re_encrypt(&self, envelope: &str) -> Result<String, CryptoError> {
        self.re_encrypt_inner(envelope)
            .map_err(|e| CryptoError::ReEncryption(Box::new(e)))
    }

    fn re_encrypt_inner(&self, envelope: &str) -> Result<String, CryptoError> {
        let plaintext = self.decrypt(envelope)?;
        self.encrypt(&plaintext)
    }
}

/// Encrypt with environment-sourced keys (configuration is read per call).
pub fn encrypt(plaintext: &str) -> Result<String, CryptoError> {
    SecretCrypto::from_env().encrypt(plaintext)
}

/// Decrypt with environment-sourced keys (configuration is read per call).
pub fn decrypt(envelope: &str) -> Result<String, CryptoError> {
    SecretCrypto::from_env().decrypt(envelope)
}

/// Re-encrypt with environment-sourced keys (configuration is read per call).
pub fn re_encrypt(envelope: &str) -> Result<String, CryptoError> {
    SecretCrypto::from_env().re_encrypt(envelope)
}
