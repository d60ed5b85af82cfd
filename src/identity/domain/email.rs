//! Normalized email address value type.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email address trimmed and lowercased at construction.
///
/// Two addresses differing only in case or surrounding whitespace compare
/// equal, so uniqueness checks and lookups share one canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a normalized email address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyField`] when the value is empty
    /// after trimming, or [`IdentityDomainError::InvalidEmail`] if it does
    /// not contain exactly one `@` with non-empty text on both sides.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(IdentityDomainError::EmptyField("email"));
        }

        let is_valid = !normalized.chars().any(char::is_whitespace)
            && normalized
                .split_once('@')
                .is_some_and(|(local, domain)| {
                    !local.is_empty() && !domain.is_empty() && !domain.contains('@')
                });

        if !is_valid {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the email address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
