pub mod algorithm;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod mask;
pub mod migrate;
pub mod secret;
pub mod types;

pub use algorithm::{Algorithm, CURRENT_ALGORITHM};
pub use envelope::{needs_migration, parse_envelope, Envelope, EnvelopeFormat};
pub use error::CryptoError;
pub use keys::{EnvKeyResolver, KeyMaterial, KeyResolver, StaticKeyResolver};
pub use mask::mask_api_key;
pub use migrate::re_encrypt_batch;
pub use secret::{decrypt, encrypt, re_encrypt, SecretCrypto};
pub use types::{
    AES_GCM_IV_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, CURRENT_KEY_VERSION, ENCRYPTION_KEY_VAR,
};
