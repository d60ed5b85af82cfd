//! In-memory repository for user accounts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, EmployeeId, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
///
/// Clones share one underlying store, so handing the same repository to
/// several services mirrors how a shared database behaves.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    email_index: HashMap<EmailAddress, UserId>,
    employee_index: HashMap<EmployeeId, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.email_index.contains_key(user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        if state.employee_index.contains_key(user.employee_id()) {
            return Err(UserRepositoryError::DuplicateEmployeeId(
                user.employee_id().clone(),
            ));
        }

        state.email_index.insert(user.email().clone(), user.id());
        state
            .employee_index
            .insert(user.employee_id().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .email_index
            .get(email)
            .and_then(|user_id| state.users.get(user_id))
            .cloned();
        Ok(user)
    }
}
