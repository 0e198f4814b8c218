//! Envelope wire format.
//!
//! Current form: `v{version}.{algorithm}:{ivHex}:{tagHex}:{cipherHex}`
//! Legacy versioned: `v{version}:{ivHex}:{tagHex}:{cipherHex}`
//! Legacy bare: `{ivHex}:{tagHex}:{cipherHex}` (key version 1, predates versioning)

use crate::algorithm::{Algorithm, CURRENT_ALGORITHM};
use crate::error::CryptoError;
use crate::types::CURRENT_KEY_VERSION;

/// Parsed envelope header.
///
/// `Current` keeps the raw wire identifier rather than an [`Algorithm`] so
/// that migration inspection still works for identifiers this build cannot
/// decrypt; resolution to a cipher happens at decrypt time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeFormat {
    /// `v{N}.{algo}:` prefix.
    Current { version: u32, algorithm: String },
    /// `v{N}:` prefix, written before algorithm tagging existed.
    LegacyVersioned { version: u32 },
    /// No prefix at all, the oldest form.
    LegacyBare,
}

impl EnvelopeFormat {
    /// Split an envelope into its header and body.
    ///
    /// Total: anything without a recognized prefix is the bare legacy form.
    /// Hex bodies cannot contain `v`, so a bare envelope never aliases a
    /// versioned prefix.
    pub fn detect(envelope: &str) -> (EnvelopeFormat, &str) {
        if let Some(rest) = envelope.strip_prefix('v') {
            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            if digits_end > 0 {
                if let Ok(version) = rest[..digits_end].parse::<u32>() {
                    let tail = &rest[digits_end..];
                    if let Some(body) = tail.strip_prefix(':') {
                        return (EnvelopeFormat::LegacyVersioned { version }, body);
                    }
                    if let Some(after_dot) = tail.strip_prefix('.') {
                        if let Some((algo, body)) = after_dot.split_once(':') {
                            if !algo.is_empty()
                                && algo
                                    .chars()
                                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                            {
                                return (
                                    EnvelopeFormat::Current {
                                        version,
                                        algorithm: algo.to_string(),
                                    },
                                    body,
                                );
                            }
                        }
                    }
                }
            }
        }
        (EnvelopeFormat::LegacyBare, envelope)
    }

    /// Key version the envelope was written under.
    pub fn key_version(&self) -> u32 {
        match self {
            EnvelopeFormat::Current { version, .. } => *version,
            EnvelopeFormat::LegacyVersioned { version } => *version,
            EnvelopeFormat::LegacyBare => 1,
        }
    }

    /// Algorithm identifier; legacy forms default to the current algorithm.
    pub fn algorithm_id(&self) -> &str {
        match self {
            EnvelopeFormat::Current { algorithm, .. } => algorithm,
            _ => CURRENT_ALGORITHM.id(),
        }
    }

    pub fn is_legacy(&self) -> bool {
        !matches!(self, EnvelopeFormat::Current { .. })
    }
}

/// A fully parsed envelope: header plus decoded binary fields.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub format: EnvelopeFormat,
    pub iv: Vec<u8>,
    pub auth_tag: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

/// Parse an envelope string in any supported form.
///
/// The body must be exactly three `:`-separated hex fields. Field byte
/// lengths are validated later, against the resolved algorithm.
pub fn parse_envelope(envelope: &str) -> Result<Envelope, CryptoError> {
    let (format, body) = EnvelopeFormat::detect(envelope);
    let fields: Vec<&str> = body.split(':').collect();
    if fields.len() != 3 {
        return Err(CryptoError::InvalidFieldCount(fields.len()));
    }
    let iv = hex::decode(fields[0]).map_err(|_| CryptoError::InvalidHex { field: "iv" })?;
    let auth_tag =
        hex::decode(fields[1]).map_err(|_| CryptoError::InvalidHex { field: "auth tag" })?;
    let ciphertext =
        hex::decode(fields[2]).map_err(|_| CryptoError::InvalidHex { field: "ciphertext" })?;
    Ok(Envelope {
        format,
        iv,
        auth_tag,
        ciphertext,
    })
}

/// Encode an envelope in the current wire form.
pub fn encode_envelope(
    version: u32,
    algorithm: Algorithm,
    iv: &[u8],
    auth_tag: &[u8],
    ciphertext: &[u8],
) -> String {
    format!(
        "v{}.{}:{}:{}:{}",
        version,
        algorithm.id(),
        hex::encode(iv),
        hex::encode(auth_tag),
        hex::encode(ciphertext)
    )
}

/// True when an envelope should be re-encrypted to the current defaults:
/// it is in a legacy form, or its key version or algorithm differs from
/// the current ones. Header inspection only, no key resolution or crypto.
pub fn needs_migration(envelope: &str) -> bool {
    let (format, _) = EnvelopeFormat::detect(envelope);
    format.is_legacy()
        || format.key_version() != CURRENT_KEY_VERSION
        || format.algorithm_id() != CURRENT_ALGORITHM.id()
}
