//! Password-at-rest hashing.
//!
//! bcrypt with its built-in salt and `$2b$` version prefix. The cost is the crate's
//! default and never leaves this module. Both operations run on the blocking pool.

use thiserror::Error;
use tokio::task;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

pub async fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let plaintext = plaintext.to_owned();
    task::spawn_blocking(move || bcrypt::hash(plaintext, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

/// `true` only when `plaintext` matches `hash`.
///
/// bcrypt compares digests in constant time. A malformed stored hash counts as a
/// mismatch so callers cannot tell it apart from a wrong password.
pub async fn verify_password(hash: &str, plaintext: &str) -> bool {
    let (hash, plaintext) = (hash.to_owned(), plaintext.to_owned());
    match task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await {
        Ok(Ok(is_valid)) => is_valid,
        Ok(Err(e)) => {
            tracing::warn!("SECURITY: Stored password hash could not be parsed: {}", e);
            false
        }
        Err(e) => {
            tracing::error!("Password verification task failed: {}", e);
            false
        }
    }
}
