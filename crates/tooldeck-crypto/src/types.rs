/// Key version used for new encryptions.
///
/// Version 1 keys predate envelope versioning; envelopes without a `v{N}`
/// prefix are decrypted under version 1.
pub const CURRENT_KEY_VERSION: u32 = 2;

/// AES-GCM IV length in bytes (96 bits per NIST recommendation).
pub const AES_GCM_IV_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// Default key environment variable (64 hex characters).
/// `ENCRYPTION_KEY_V{N}` overrides it for key version `N`.
pub const ENCRYPTION_KEY_VAR: &str = "ENCRYPTION_KEY";
