//! Integration tests for the environment-backed encryption path.
//!
//! These tests mutate process environment variables, so they serialize on a
//! shared lock. Everything that does not need the environment lives in the
//! in-module unit tests against `StaticKeyResolver`.

use std::env;
use std::sync::{Mutex, MutexGuard};

use tooldeck_crypto::{decrypt, encrypt, needs_migration, re_encrypt, SecretCrypto};

// ============================================================================
// Helpers
// ============================================================================

static ENV_LOCK: Mutex<()> = Mutex::new(());

const KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
const OTHER_KEY_HEX: &str = "ffeeddccbbaa99887766554433221100ffeeddccbbaa99887766554433221100";

/// Take the env lock and clear every variable the resolver reads.
fn clean_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::remove_var("ENCRYPTION_KEY");
    for version in 1..=9 {
        env::remove_var(format!("ENCRYPTION_KEY_V{}", version));
    }
    guard
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn encrypt_decrypt_round_trip_via_env() {
    let _guard = clean_env();
    env::set_var("ENCRYPTION_KEY", KEY_HEX);

    let envelope = encrypt("sk-test-1234567890").unwrap();
    let segments: Vec<&str> = envelope.split(':').collect();
    assert_eq!(segments.len(), 4);
    assert_eq!(segments[0], "v2.aes256gcm");
    assert_eq!(decrypt(&envelope).unwrap(), "sk-test-1234567890");
}

#[test]
fn missing_key_mentions_variable() {
    let _guard = clean_env();

    let err = encrypt("anything").unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "Encryption failed: ENCRYPTION_KEY environment variable is not set"
    );
}

#[test]
fn short_key_is_length_error() {
    let _guard = clean_env();
    env::set_var("ENCRYPTION_KEY", "0011223344");

    let err = encrypt("anything").unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("expected 32 bytes, got 5"));
}

#[test]
fn non_hex_key_is_configuration_error() {
    let _guard = clean_env();
    env::set_var("ENCRYPTION_KEY", "not hex at all, definitely not 64 chars of it");

    let err = encrypt("anything").unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn versioned_key_overrides_default() {
    let _guard = clean_env();
    env::set_var("ENCRYPTION_KEY", KEY_HEX);
    let envelope = encrypt("pinned to v2").unwrap();

    // A V2-specific key takes over; the old default no longer decrypts v2 rows
    env::set_var("ENCRYPTION_KEY_V2", OTHER_KEY_HEX);
    let err = decrypt(&envelope).unwrap_err();
    assert!(err.is_authentication());

    env::set_var("ENCRYPTION_KEY_V2", KEY_HEX);
    assert_eq!(decrypt(&envelope).unwrap(), "pinned to v2");
}

#[test]
fn rotation_takes_effect_without_restart() {
    let _guard = clean_env();
    env::set_var("ENCRYPTION_KEY", KEY_HEX);
    let sc = SecretCrypto::from_env();
    let envelope = sc.encrypt("live rotation").unwrap();

    // Same instance, new configuration: v1 rows pick up ENCRYPTION_KEY_V1
    env::set_var("ENCRYPTION_KEY_V1", KEY_HEX);
    env::set_var("ENCRYPTION_KEY", OTHER_KEY_HEX);
    env::set_var("ENCRYPTION_KEY_V2", KEY_HEX);
    assert_eq!(sc.decrypt(&envelope).unwrap(), "live rotation");
}

#[test]
fn legacy_forms_decrypt_and_migrate() {
    let _guard = clean_env();
    env::set_var("ENCRYPTION_KEY", KEY_HEX);

    // Craft the two legacy forms from a v1 envelope under the same key
    env::set_var("ENCRYPTION_KEY_V1", KEY_HEX);
    let sc = SecretCrypto::from_env();
    let v1 = sc
        .encrypt_with("legacy row", 1, tooldeck_crypto::Algorithm::Aes256Gcm)
        .unwrap();
    let body = v1.strip_prefix("v1.aes256gcm:").unwrap();
    let versioned = format!("v1:{}", body);

    assert_eq!(decrypt(&versioned).unwrap(), "legacy row");
    assert_eq!(decrypt(body).unwrap(), "legacy row");
    assert!(needs_migration(&versioned));
    assert!(needs_migration(body));

    let migrated = re_encrypt(&versioned).unwrap();
    assert!(migrated.starts_with("v2.aes256gcm:"));
    assert!(!needs_migration(&migrated));
    assert_eq!(decrypt(&migrated).unwrap(), "legacy row");
}
