use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("{variable} environment variable is not set")]
    KeyNotSet { variable: String },

    #[error("No key configured for version {0}")]
    KeyNotConfigured(u32),

    #[error("{variable} is not valid hex: {detail}")]
    InvalidKeyEncoding { variable: String, detail: String },

    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid envelope format: expected 3 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("Invalid envelope format: {field} is not valid hex")]
    InvalidHex { field: &'static str },

    #[error("Invalid IV length: expected {expected} bytes, got {got}")]
    InvalidIvLength { expected: usize, got: usize },

    #[error("Invalid auth tag length: expected {expected} bytes, got {got}")]
    InvalidTagLength { expected: usize, got: usize },

    #[error("Authentication failed: auth tag does not verify")]
    AuthenticationFailed,

    #[error("Decrypted data is not valid UTF-8")]
    InvalidUtf8,

    #[error("Cipher failure: {0}")]
    CipherFailure(String),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),

    #[error("Encryption failed: {0}")]
    Encryption(#[source] Box<CryptoError>),

    #[error("Decryption failed: {0}")]
    Decryption(#[source] Box<CryptoError>),

    #[error("Re-encryption failed: {0}")]
    ReEncryption(#[source] Box<CryptoError>),
}

impl CryptoError {
    /// Unwrap contextual layers (`Encryption`, `Decryption`, `ReEncryption`)
    /// down to the underlying failure.
    pub fn root_cause(&self) -> &CryptoError {
        match self {
            CryptoError::Encryption(inner)
            | CryptoError::Decryption(inner)
            | CryptoError::ReEncryption(inner) => inner.root_cause(),
            other => other,
        }
    }

    /// True when the failure is a key-configuration problem (missing key,
    /// bad encoding, wrong length) that the operator must fix.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self.root_cause(),
            CryptoError::KeyNotSet { .. }
                | CryptoError::KeyNotConfigured(_)
                | CryptoError::InvalidKeyEncoding { .. }
                | CryptoError::InvalidKeyLength { .. }
        )
    }

    /// True when the AEAD tag was rejected: tampering, corruption, or a
    /// wrong key for the claimed version.
    pub fn is_authentication(&self) -> bool {
        matches!(self.root_cause(), CryptoError::AuthenticationFailed)
    }
}
