//! Salted password hashing (argon2id, PHC string format)
//!
//! Both operations run on the blocking thread pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tokio::task;

use crate::error::UserFeatureError;

/// Hash `password` with a fresh random salt
pub async fn hash_password(password: &str) -> Result<String, UserFeatureError> {
    let password = password.to_owned();

    task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| UserFeatureError::Hashing(e.to_string()))?
}

/// Check `password` against a stored hash. An unparseable hash never matches.
pub async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_owned();
    let hash = hash.to_owned();

    task::spawn_blocking(move || verify_blocking(&password, &hash))
        .await
        .unwrap_or(false)
}

fn hash_blocking(password: &str) -> Result<String, UserFeatureError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserFeatureError::Hashing(e.to_string()))
}

fn verify_blocking(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
