//! Argon2id password hashing in PHC string format.
//!
//! Both operations are CPU-bound and run on the blocking thread pool.

use crate::{ProviderError, Result as ProviderResult};

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::Rng;

/// Hash `password` with a fresh random salt
pub async fn hash_password(password: String) -> ProviderResult<String> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| ProviderError::hashing(e.to_string()))?
}

/// Constant-time check of `password` against a stored PHC hash.
/// An unparseable hash never matches.
pub async fn verify_password(password: String, hash: String) -> ProviderResult<bool> {
    tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
        .await
        .map_err(|e| ProviderError::hashing(e.to_string()))
}

pub(crate) fn hash_blocking(password: &str) -> ProviderResult<String> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| ProviderError::hashing(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ProviderError::hashing(e.to_string()))
}

pub(crate) fn verify_blocking(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
