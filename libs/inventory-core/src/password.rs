use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::warn;

use crate::CoreError;

/// Hashes a password into a salted argon2 PHC string.
///
/// Runs on the blocking pool.
pub async fn hash_password(plain: String) -> Result<String, CoreError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CoreError::Internal(format!("password hashing failed: {e}")))
    })
    .await
    .map_err(|e| CoreError::Internal(format!("password hashing task failed: {e}")))?
}

/// Checks a password against a stored PHC string. A hash that does not parse never matches.
pub async fn verify_password(plain: String, stored_hash: String) -> Result<bool, CoreError> {
    tokio::task::spawn_blocking(move || match PasswordHash::new(&stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is not a valid PHC string: {}", e);
            false
        }
    })
    .await
    .map_err(|e| CoreError::Internal(format!("password verification task failed: {e}")))
}
