//! Batch re-encryption of stored envelopes.
//!
//! Migration tooling walks stored rows after a key rotation or an algorithm
//! change and rewrites the stale ones. Rows already at the current version
//! and algorithm are left untouched.

use tracing::{debug, info};

use crate::envelope::needs_migration;
use crate::error::CryptoError;
use crate::keys::KeyResolver;
use crate::secret::SecretCrypto;

/// Re-encrypt every stale envelope in `rows` under the current defaults.
///
/// Takes `(id, envelope)` pairs and returns only the rows that changed,
/// paired with their new envelopes. The first failure aborts the batch and
/// discards partial results; callers re-run after fixing configuration.
pub fn re_encrypt_batch<R: KeyResolver>(
    crypto: &SecretCrypto<R>,
    rows: &[(String, String)],
) -> Result<Vec<(String, String)>, CryptoError> {
    let mut migrated = Vec::new();
    for (id, envelope) in rows {
        if !needs_migration(envelope) {
            debug!(id = id.as_str(), "envelope already current, skipping");
            continue;
        }
        let rewritten = crypto.re_encrypt(envelope)?;
        migrated.push((id.clone(), rewritten));
    }
    info!(
        total = rows.len(),
        migrated = migrated.len(),
        "batch re-encryption complete"
    );
    Ok(migrated)
}
