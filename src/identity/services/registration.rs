//! Account registration service.

use crate::identity::{
    domain::{
        EmailAddress, EmployeeId, IdentityClaim, IdentityDomainError, NewUserProfile, User,
        required_text,
    },
    ports::{PasswordHasher, UserRepository},
};
use crate::outcome::{ServiceError, ServiceResult};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    employee_id: String,
    first_name: String,
    last_name: String,
    email: String,
    department: String,
    position: String,
    password: String,
}

impl RegisterUserRequest {
    /// Creates a request with the credential fields.
    #[must_use]
    pub fn new(
        employee_id: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            department: String::new(),
            position: String::new(),
            password: password.into(),
        }
    }

    /// Sets first and last name.
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Sets the department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the job position.
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Validates all profile fields, keeping the password exactly as
    /// supplied.
    ///
    /// The password must be non-blank but is hashed untrimmed; interior or
    /// surrounding whitespace is part of the secret.
    fn into_validated(self) -> Result<(NewUserProfile, String), IdentityDomainError> {
        if self.password.trim().is_empty() {
            return Err(IdentityDomainError::EmptyField("password"));
        }

        let profile = NewUserProfile {
            employee_id: EmployeeId::new(self.employee_id)?,
            first_name: required_text("first name", &self.first_name)?,
            last_name: required_text("last name", &self.last_name)?,
            email: EmailAddress::new(self.email)?,
            department: required_text("department", &self.department)?,
            position: required_text("position", &self.position)?,
        };
        Ok((profile, self.password))
    }
}

/// Registers new accounts with hashed credentials.
#[derive(Clone)]
pub struct RegistrationService<U, H, C>
where
    U: UserRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<U, H, C> RegistrationService<U, H, C>
where
    U: UserRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    /// Creates a new registration service.
    #[must_use]
    pub const fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    /// Registers an account and returns the claim for immediate sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] when a profile field is
    /// invalid or the email or employee number is already registered, and
    /// [`ServiceError::Internal`] when storage or hashing fails.
    pub async fn register(&self, request: RegisterUserRequest) -> ServiceResult<IdentityClaim> {
        let (profile, password) = request.into_validated()?;

        // The pre-check gives the caller-facing duplicate message; the
        // storage unique constraint still enforces integrity in the race
        // window between check and insert.
        let existing = self.users.find_by_email(&profile.email).await?;
        if existing.is_some() {
            return Err(ServiceError::validation(
                "User already exists with this email.",
            ));
        }

        let password_hash = self.hasher.hash(&password).await?;
        let user = User::new(profile, password_hash, &*self.clock);
        self.users.insert(&user).await?;
        Ok(user.claim())
    }
}
