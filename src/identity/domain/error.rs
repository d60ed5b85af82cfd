//! Error types for identity domain validation.

use thiserror::Error;

/// Validation failures raised while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// A required text field was empty after trimming.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    /// The value does not have the shape of an email address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}
