//! Credential verification service producing identity claims.

use crate::identity::{
    domain::{EmailAddress, IdentityClaim},
    ports::{PasswordHasher, UserRepository},
};
use crate::outcome::{ServiceError, ServiceResult};
use std::sync::Arc;

/// Verifies email/password credentials against stored accounts.
#[derive(Clone)]
pub struct CredentialVerifier<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> CredentialVerifier<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Creates a new credential verifier.
    #[must_use]
    pub const fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }

    /// Checks credentials and produces the claim a session embeds.
    ///
    /// Read-only: verification never mutates stored accounts. Session
    /// lifecycle (issuance, renewal, expiry) belongs to the external auth
    /// collaborator consuming the claim.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no account carries the
    /// email, [`ServiceError::InvalidCredentials`] when the password does
    /// not match, and [`ServiceError::Internal`] when storage or hashing
    /// fails.
    pub async fn verify(&self, email: &str, password: &str) -> ServiceResult<IdentityClaim> {
        let Ok(address) = EmailAddress::new(email) else {
            return Err(ServiceError::not_found("No user found with this email"));
        };
        let user = self
            .users
            .find_by_email(&address)
            .await?
            .ok_or_else(|| ServiceError::not_found("No user found with this email"))?;

        let matches = self.hasher.verify(password, user.password_hash()).await?;
        if !matches {
            return Err(ServiceError::invalid_credentials("Invalid password"));
        }
        Ok(user.claim())
    }
}
