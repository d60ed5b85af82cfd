//! Directory service resolving stored users for other services.

use crate::identity::{
    domain::{EmailAddress, User, UserId},
    ports::UserRepository,
};
use crate::outcome::{ServiceError, ServiceResult};
use std::sync::Arc;

/// Read-only lookup facade over the user repository.
#[derive(Clone)]
pub struct UserDirectory<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> UserDirectory<U>
where
    U: UserRepository,
{
    /// Creates a new directory over a user repository.
    #[must_use]
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Resolves a user by email address.
    ///
    /// The input is normalised before lookup; an input that cannot be an
    /// email address resolves to `NotFound`, since no stored user can
    /// match it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no user carries the address
    /// and [`ServiceError::Internal`] when the lookup itself fails.
    pub async fn resolve_by_email(&self, email: &str) -> ServiceResult<User> {
        let Ok(address) = EmailAddress::new(email) else {
            return Err(ServiceError::not_found(format!(
                "User with email {email} not found"
            )));
        };
        let user = self.users.find_by_email(&address).await?;
        user.ok_or_else(|| ServiceError::not_found(format!("User with email {email} not found")))
    }

    /// Resolves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when the user does not exist and
    /// [`ServiceError::Internal`] when the lookup itself fails.
    pub async fn resolve_by_id(&self, id: UserId) -> ServiceResult<User> {
        let user = self.users.find_by_id(id).await?;
        user.ok_or_else(|| ServiceError::not_found("User not found"))
    }
}
