//! Bcrypt-backed password hashing adapter.

use async_trait::async_trait;
use bcrypt::DEFAULT_COST;

use crate::identity::{
    domain::PasswordHash,
    ports::{PasswordHashError, PasswordHashResult, PasswordHasher},
};

/// Password hasher backed by the bcrypt algorithm.
///
/// Hashing and verification run on the blocking thread pool; bcrypt work
/// at production cost takes tens of milliseconds and must not stall the
/// async executor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Creates a hasher at the default bcrypt cost.
    #[must_use]
    pub const fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Creates a hasher at a caller-chosen cost.
    ///
    /// Tests use a low cost to keep hashing fast; production code should
    /// stay at [`BcryptHasher::new`].
    #[must_use]
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, plaintext: &str) -> PasswordHashResult<PasswordHash> {
        let cost = self.cost;
        let password = plaintext.to_owned();
        let digest = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(PasswordHashError::new)?
            .map_err(PasswordHashError::new)?;
        Ok(PasswordHash::new(digest))
    }

    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> PasswordHashResult<bool> {
        let password = plaintext.to_owned();
        let digest = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &digest))
            .await
            .map_err(PasswordHashError::new)?
            .map_err(PasswordHashError::new)
    }
}
