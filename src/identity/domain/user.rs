//! User aggregate root and read-model projections.

use super::{EmailAddress, EmployeeId, IdentityClaim, IdentityDomainError, PasswordHash, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validates a required free-text field, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns [`IdentityDomainError::EmptyField`] when the value is empty
/// after trimming.
pub fn required_text(field: &'static str, value: &str) -> Result<String, IdentityDomainError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(IdentityDomainError::EmptyField(field));
    }
    Ok(normalized.to_owned())
}

/// User aggregate root.
///
/// Deliberately not serializable: the aggregate owns the password hash,
/// and everything leaving the crate goes through [`IdentityClaim`] or
/// [`UserSummary`] projections instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    employee_id: EmployeeId,
    first_name: String,
    last_name: String,
    email: EmailAddress,
    department: String,
    position: String,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated profile data for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserProfile {
    /// Employee number, unique per user.
    pub employee_id: EmployeeId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Canonical email address, unique per user.
    pub email: EmailAddress,
    /// Department the user belongs to.
    pub department: String,
    /// Job position of the user.
    pub position: String,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted employee number.
    pub employee_id: EmployeeId,
    /// Persisted given name.
    pub first_name: String,
    /// Persisted family name.
    pub last_name: String,
    /// Persisted canonical email address.
    pub email: EmailAddress,
    /// Persisted department.
    pub department: String,
    /// Persisted job position.
    pub position: String,
    /// Persisted password hash digest.
    pub password_hash: PasswordHash,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user from a validated profile and password hash.
    #[must_use]
    pub fn new(profile: NewUserProfile, password_hash: PasswordHash, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            employee_id: profile.employee_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            department: profile.department,
            position: profile.position,
            password_hash,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            employee_id: data.employee_id,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            department: data.department,
            position: data.position,
            password_hash: data.password_hash,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the employee number.
    #[must_use]
    pub const fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the canonical email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the department.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Returns the job position.
    #[must_use]
    pub fn position(&self) -> &str {
        &self.position
    }

    /// Returns the stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the display name, first and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Projects the identity claim attached to sessions at sign-in.
    #[must_use]
    pub fn claim(&self) -> IdentityClaim {
        IdentityClaim {
            user_id: self.id,
            email: self.email.clone(),
            employee_id: self.employee_id.clone(),
            name: self.full_name(),
            department: self.department.clone(),
            position: self.position.clone(),
        }
    }

    /// Projects the participant summary embedded in task read models.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            name: self.full_name(),
            email: self.email.clone(),
        }
    }
}

/// Participant projection embedded in task read models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Display name, first and last name joined by a space.
    pub name: String,
    /// Canonical email address.
    pub email: EmailAddress,
}
