//! Hashing port separating credential checks from any concrete algorithm.

use crate::identity::domain::PasswordHash;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for password hashing operations.
pub type PasswordHashResult<T> = Result<T, PasswordHashError>;

/// Password hashing contract.
///
/// Implementations must use a salted, computationally expensive digest;
/// verification compares a plaintext candidate against a stored hash
/// without ever exposing the digest.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password for storage.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when the hashing backend fails.
    async fn hash(&self, plaintext: &str) -> PasswordHashResult<PasswordHash>;

    /// Checks a plaintext candidate against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when the stored hash cannot be parsed
    /// or the hashing backend fails. A well-formed mismatch is `Ok(false)`,
    /// not an error.
    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> PasswordHashResult<bool>;
}

/// Failure raised by a password hashing backend.
#[derive(Debug, Clone, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(Arc<dyn std::error::Error + Send + Sync>);

impl PasswordHashError {
    /// Wraps a hashing backend error.
    #[must_use]
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
