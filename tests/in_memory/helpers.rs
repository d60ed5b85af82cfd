//! Shared test helpers for in-memory service integration tests.

use std::sync::Arc;

use corkboard::identity::{
    adapters::{BcryptHasher, memory::InMemoryUserRepository},
    domain::Session,
    services::{CredentialVerifier, RegisterUserRequest, RegistrationService, UserDirectory},
};
use corkboard::seed::DemoSeeder;
use corkboard::task::{
    adapters::memory::InMemoryTaskRepository, services::TaskCollaborationService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Boxed error alias for fallible test helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Registration service wired over the in-memory stack.
pub type TestRegistration = RegistrationService<InMemoryUserRepository, BcryptHasher, DefaultClock>;

/// Credential verifier wired over the in-memory stack.
pub type TestVerifier = CredentialVerifier<InMemoryUserRepository, BcryptHasher>;

/// Collaboration service wired over the in-memory stack.
pub type TestCollaboration =
    TaskCollaborationService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;

/// Demo seeder wired over the in-memory stack.
pub type TestSeeder =
    DemoSeeder<InMemoryUserRepository, InMemoryTaskRepository, BcryptHasher, DefaultClock>;

/// Password used by every account the helpers register.
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Full service stack sharing one pair of in-memory repositories.
pub struct AppStack {
    /// Account registration.
    pub registration: TestRegistration,
    /// Credential sign-in.
    pub verifier: TestVerifier,
    /// Session-scoped task operations.
    pub collaboration: TestCollaboration,
    /// Demo data provisioning.
    pub seeder: TestSeeder,
}

impl AppStack {
    fn new() -> Self {
        let user_store = InMemoryUserRepository::new();
        let users = Arc::new(user_store.clone());
        let tasks = Arc::new(InMemoryTaskRepository::new(user_store));
        // Minimum bcrypt cost keeps hashing fast in tests.
        let hasher = Arc::new(BcryptHasher::with_cost(4));
        let clock = Arc::new(DefaultClock);

        Self {
            registration: RegistrationService::new(
                Arc::clone(&users),
                Arc::clone(&hasher),
                Arc::clone(&clock),
            ),
            verifier: CredentialVerifier::new(Arc::clone(&users), Arc::clone(&hasher)),
            collaboration: TaskCollaborationService::new(
                Arc::clone(&tasks),
                UserDirectory::new(Arc::clone(&users)),
                Arc::clone(&clock),
            ),
            seeder: DemoSeeder::new(users, tasks, hasher, clock),
        }
    }

    /// Registers an employee with [`TEST_PASSWORD`] and returns a
    /// signed-in session for them.
    ///
    /// # Errors
    ///
    /// Returns an error when registration fails.
    pub async fn register_employee(
        &self,
        employee_id: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Session, BoxError> {
        let request = RegisterUserRequest::new(employee_id, email, TEST_PASSWORD)
            .with_name(first_name, last_name)
            .with_department("Engineering")
            .with_position("Developer");
        let claim = self.registration.register(request).await?;
        Ok(Session::authenticated(claim))
    }

    /// Signs an existing account in and returns its session.
    ///
    /// # Errors
    ///
    /// Returns an error when verification fails.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BoxError> {
        let claim = self.verifier.verify(email, password).await?;
        Ok(Session::authenticated(claim))
    }
}

/// Provides a fresh service stack for each test.
#[fixture]
pub fn stack() -> AppStack {
    AppStack::new()
}
