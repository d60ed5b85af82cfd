//! Repository port for user persistence and lookup.

use crate::identity::domain::{EmailAddress, EmployeeId, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] when the email address
    /// is already registered or [`UserRepositoryError::DuplicateEmployeeId`]
    /// when the employee number is already registered.
    async fn insert(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by canonical email address.
    ///
    /// Returns `None` when no user carries the address.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same email address already exists.
    #[error("a user with email {0} already exists")]
    DuplicateEmail(EmailAddress),

    /// A user with the same employee number already exists.
    #[error("a user with employee id {0} already exists")]
    DuplicateEmployeeId(EmployeeId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
