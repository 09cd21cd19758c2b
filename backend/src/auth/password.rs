//! Password hashing using argon2
//!
//! Provides secure password hashing and verification.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. Request handlers must use the
//! `*_async` variants, which run on the blocking thread pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use once_cell::sync::Lazy;

/// Argon2 memory cost in KiB
pub const MEMORY_COST_KIB: u32 = 19 * 1024;
/// Argon2 iteration count
pub const ITERATIONS: u32 = 2;
/// Argon2 lanes
pub const PARALLELISM: u32 = 1;

/// Hash of a throwaway password, verified against when a login names an
/// unknown user so that both failure paths cost the same.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| PasswordService::hash("dummy-password-for-timing").ok());

/// Password hashing service
///
/// Uses Argon2id which is the recommended variant for password hashing.
/// It provides resistance against both side-channel and GPU-based attacks.
pub struct PasswordService;

impl PasswordService {
    fn argon2() -> Result<Argon2<'static>> {
        let params = Params::new(MEMORY_COST_KIB, ITERATIONS, PARALLELISM, None)
            .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {}", e))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a password using argon2 (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a hash (blocking operation)
    ///
    /// The parameters encoded in the stored hash are used, so hashes made
    /// under older cost settings still verify.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        Ok(Self::argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Compute the dummy hash now instead of on the first unknown-user login
    pub fn prepare_dummy_hash() -> bool {
        Lazy::force(&DUMMY_HASH).is_some()
    }

    /// Burn one verification's worth of CPU; the result is discarded
    ///
    /// The dummy hash is read inside the blocking task, so its one-time
    /// construction never runs on an async worker.
    pub async fn verify_dummy_async(password: String) {
        let _ = tokio::task::spawn_blocking(move || {
            DUMMY_HASH
                .as_deref()
                .map(|hash| Self::verify(&password, hash))
        })
        .await;
    }
}
