//! Shared error taxonomy and result envelope for the service layer.
//!
//! Every service operation returns [`ServiceResult`], classifying failures
//! into the small set of categories callers act on: missing authentication,
//! missing records, rejected input, denied permissions, bad credentials,
//! and infrastructure faults. [`Outcome`] flattens a result into the
//! serializable success/error envelope handed to transport layers.

use serde::Serialize;
use thiserror::Error;

use crate::identity::domain::IdentityDomainError;
use crate::identity::ports::{PasswordHashError, UserRepositoryError};
use crate::task::domain::TaskDomainError;
use crate::task::ports::TaskRepositoryError;

/// Failure categories surfaced by service operations.
///
/// Each variant carries the message shown to the caller verbatim, so
/// converting to an envelope never has to re-derive wording.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The caller presented no authenticated identity.
    #[error("{0}")]
    Unauthorized(String),
    /// The referenced record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The input was rejected before reaching storage.
    #[error("{0}")]
    Validation(String),
    /// The caller is authenticated but lacks permission for the operation.
    #[error("{0}")]
    Forbidden(String),
    /// The presented credentials did not match a stored account.
    #[error("{0}")]
    InvalidCredentials(String),
    /// Storage or another dependency failed.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Builds an [`ServiceError::Unauthorized`] error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Builds a [`ServiceError::NotFound`] error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Builds a [`ServiceError::Validation`] error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Builds a [`ServiceError::Forbidden`] error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Builds an [`ServiceError::InvalidCredentials`] error.
    #[must_use]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials(message.into())
    }

    /// Builds an [`ServiceError::Internal`] error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<IdentityDomainError> for ServiceError {
    fn from(err: IdentityDomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<TaskDomainError> for ServiceError {
    fn from(err: TaskDomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PasswordHashError> for ServiceError {
    fn from(err: PasswordHashError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<UserRepositoryError> for ServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::Persistence(cause) => Self::Internal(cause.to_string()),
            duplicate @ (UserRepositoryError::DuplicateEmail(_)
            | UserRepositoryError::DuplicateEmployeeId(_)) => {
                Self::Validation(duplicate.to_string())
            }
        }
    }
}

impl From<TaskRepositoryError> for ServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(_) => Self::NotFound("Task not found".to_owned()),
            TaskRepositoryError::Persistence(cause) => Self::Internal(cause.to_string()),
            other @ (TaskRepositoryError::DuplicateTask(_)
            | TaskRepositoryError::MissingParticipant(_)) => Self::Internal(other.to_string()),
        }
    }
}

/// Result alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Serializable success/error envelope for transport layers.
///
/// Exactly one of `data` and `error` is populated; `success` mirrors
/// which one.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Outcome<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload of a successful operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Message of a failed operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Outcome<T> {
    /// Wraps a payload in a successful envelope.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wraps an error message in a failed envelope.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<ServiceResult<T>> for Outcome<T> {
    fn from(result: ServiceResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
