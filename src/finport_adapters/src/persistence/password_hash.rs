use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
    #[error("Password verification failed")]
    VerificationFailed,
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

// Work factor in the same ballpark as bcrypt cost 12.
fn hasher() -> Result<Argon2<'static>, PasswordHashError> {
    let params =
        Params::new(15_000, 2, 1, None).map_err(|e| PasswordHashError::Hash(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a plaintext password with a fresh random salt.
pub async fn compute_password_hash(
    password: Secret<String>,
) -> Result<Secret<String>, PasswordHashError> {
    spawn_blocking_with_tracing(move || {
        let salt = SaltString::generate(&mut OsRng);
        let hash = hasher()?
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map_err(|e| PasswordHashError::Hash(e.to_string()))?
            .to_string();
        Ok(Secret::from(hash))
    })
    .await
    .map_err(|e| PasswordHashError::TaskFailed(e.to_string()))?
}

/// Check a candidate password against a stored PHC hash string.
pub async fn verify_password_hash(
    expected_hash: Secret<String>,
    candidate: Secret<String>,
) -> Result<(), PasswordHashError> {
    spawn_blocking_with_tracing(move || {
        let parsed_hash = PasswordHash::new(expected_hash.expose_secret())
            .map_err(|e| PasswordHashError::Hash(e.to_string()))?;
        Argon2::default()
            .verify_password(candidate.expose_secret().as_bytes(), &parsed_hash)
            .map_err(|_| PasswordHashError::VerificationFailed)
    })
    .await
    .map_err(|e| PasswordHashError::TaskFailed(e.to_string()))?
}

// Argon2 is CPU-bound and deliberately slow; run it on the blocking pool
// while keeping the caller's tracing span attached.
fn spawn_blocking_with_tracing<F, R>(f: F) -> tokio::task::JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let current_span = tracing::Span::current();
    tokio::task::spawn_blocking(move || current_span.in_scope(f))
}
