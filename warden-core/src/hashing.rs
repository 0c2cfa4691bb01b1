//! Salted one-way credential hashing.
//!
//! Argon2id with a fixed cost factor. Hashing is CPU-bound, so both
//! directions run under `spawn_blocking` to keep the request scheduler
//! responsive. Verification goes through the PHC machinery's constant-time
//! comparison.

use std::sync::LazyLock;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use thiserror::Error;

use crate::domain::password::RawPassword;

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct HashingError(String);

fn hasher() -> Result<Argon2<'static>, HashingError> {
    let params = Params::new(15000, 2, 1, None).map_err(|e| HashingError(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a raw password with a freshly generated random salt.
#[tracing::instrument(name = "Computing password hash", skip_all)]
pub async fn compute_password_hash(password: RawPassword) -> Result<String, HashingError> {
    let current_span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt = SaltString::generate(rand_core::OsRng);
            hasher()?
                .hash_password(password.expose().as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| HashingError(e.to_string()))
        })
    })
    .await
    .map_err(|e| HashingError(e.to_string()))?
}

/// Verify a candidate password against a stored hash.
///
/// Returns `Ok(false)` on a mismatch; `Err` only when the stored hash is
/// malformed or the work itself fails.
#[tracing::instrument(name = "Verify password hash", skip_all)]
pub async fn verify_password_hash(
    expected_password_hash: String,
    password_candidate: RawPassword,
) -> Result<bool, HashingError> {
    let current_span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash = PasswordHash::new(&expected_password_hash)
                .map_err(|e| HashingError(e.to_string()))?;

            match hasher()?.verify_password(
                password_candidate.expose().as_bytes(),
                &expected_password_hash,
            ) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(HashingError(e.to_string())),
            }
        })
    })
    .await
    .map_err(|e| HashingError(e.to_string()))?
}

/// Hash of a fixed throwaway password, burned on login attempts for unknown
/// usernames so the not-found path costs as much as a real verification.
pub static FALLBACK_PASSWORD_HASH: LazyLock<String> = LazyLock::new(|| {
    let salt = SaltString::generate(rand_core::OsRng);
    hasher()
        .and_then(|h| {
            h.hash_password(b"fallback-credential", &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| HashingError(e.to_string()))
        })
        .unwrap_or_default()
});

#[cfg(test)]
mod tests {
    use secrecy::Secret;

    use super::*;

    fn raw(password: &str) -> RawPassword {
        RawPassword::try_from(Secret::from(password.to_string())).unwrap()
    }

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let hash = compute_password_hash(raw("Passw0rd1")).await.unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password_hash(hash, raw("Passw0rd1")).await.unwrap());
    }

    #[tokio::test]
    async fn mutated_password_fails_verification() {
        let hash = compute_password_hash(raw("Passw0rd1")).await.unwrap();
        assert!(!verify_password_hash(hash, raw("Passw0rd2")).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_hashes_to_distinct_salted_values() {
        let first = compute_password_hash(raw("Passw0rd1")).await.unwrap();
        let second = compute_password_hash(raw("Passw0rd1")).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error_not_a_mismatch() {
        let result = verify_password_hash("not-a-phc-string".to_string(), raw("Passw0rd1")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn fallback_hash_verifies_like_a_real_one() {
        let result = verify_password_hash(FALLBACK_PASSWORD_HASH.clone(), raw("Passw0rd1"))
            .await
            .unwrap();
        assert!(!result);
    }
}
