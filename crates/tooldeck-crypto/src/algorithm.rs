//! Supported AEAD algorithms.
//!
//! Closed set: adding a cipher means adding a variant here and bumping
//! [`CURRENT_ALGORITHM`]. Old envelopes keep decrypting through the
//! identifier embedded in their header.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::CryptoError;
use crate::types::{AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH};

/// Algorithm used for new encryptions.
pub const CURRENT_ALGORITHM: Algorithm = Algorithm::Aes256Gcm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// AES-256-GCM with a 12-byte IV and a 16-byte tag.
    Aes256Gcm,
}

impl Algorithm {
    /// Wire identifier embedded in envelope headers. Matches `[a-z0-9]+`.
    pub const fn id(self) -> &'static str {
        match self {
            Algorithm::Aes256Gcm => "aes256gcm",
        }
    }

    /// IV length in bytes.
    pub const fn iv_length(self) -> usize {
        match self {
            Algorithm::Aes256Gcm => AES_GCM_IV_LENGTH,
        }
    }

    /// Auth tag length in bytes.
    pub const fn tag_length(self) -> usize {
        match self {
            Algorithm::Aes256Gcm => AES_GCM_TAG_LENGTH,
        }
    }

    /// Look up an algorithm by its wire identifier.
    pub fn from_id(id: &str) -> Result<Self, CryptoError> {
        match id {
            "aes256gcm" => Ok(Algorithm::Aes256Gcm),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
        }
    }

    /// Encrypt `plaintext` under `key` with a fresh random IV.
    ///
    /// Returns `(iv, ciphertext, tag)`. The IV comes from the OS RNG on
    /// every call; a repeated IV under the same key would void the AEAD
    /// confidentiality guarantee.
    pub(crate) fn seal(
        self,
        key: &[u8; AES_KEY_LENGTH],
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>), CryptoError> {
        match self {
            Algorithm::Aes256Gcm => {
                let cipher = Aes256Gcm::new_from_slice(key)
                    .map_err(|e| CryptoError::CipherFailure(e.to_string()))?;
                let mut iv = [0u8; AES_GCM_IV_LENGTH];
                getrandom::getrandom(&mut iv).map_err(|e| CryptoError::RngFailed(e.to_string()))?;
                let nonce = Nonce::from_slice(&iv);
                let mut sealed = cipher
                    .encrypt(nonce, plaintext)
                    .map_err(|e| CryptoError::CipherFailure(e.to_string()))?;
                let tag = sealed.split_off(sealed.len() - AES_GCM_TAG_LENGTH);
                Ok((iv.to_vec(), sealed, tag))
            }
        }
    }

    /// Decrypt `ciphertext` and verify `tag`. Any modification to either,
    /// or a wrong key, is rejected as [`CryptoError::AuthenticationFailed`].
    pub(crate) fn open(
        self,
        key: &[u8; AES_KEY_LENGTH],
        iv: &[u8],
        tag: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        match self {
            Algorithm::Aes256Gcm => {
                let cipher = Aes256Gcm::new_from_slice(key)
                    .map_err(|e| CryptoError::CipherFailure(e.to_string()))?;
                let nonce = Nonce::from_slice(iv);
                let mut sealed = Vec::with_capacity(ciphertext.len() + tag.len());
                sealed.extend_from_slice(ciphertext);
                sealed.extend_from_slice(tag);
                cipher
                    .decrypt(nonce, sealed.as_slice())
                    .map_err(|_| CryptoError::AuthenticationFailed)
            }
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
