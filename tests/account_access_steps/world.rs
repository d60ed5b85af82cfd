//! Shared world state for account access BDD scenarios.

use std::sync::Arc;

use corkboard::identity::{
    adapters::{BcryptHasher, memory::InMemoryUserRepository},
    domain::IdentityClaim,
    services::{CredentialVerifier, RegistrationService},
};
use corkboard::outcome::ServiceResult;
use mockable::DefaultClock;
use rstest::fixture;

/// Registration service type used by the BDD world.
pub type TestRegistration = RegistrationService<InMemoryUserRepository, BcryptHasher, DefaultClock>;

/// Credential verifier type used by the BDD world.
pub type TestVerifier = CredentialVerifier<InMemoryUserRepository, BcryptHasher>;

/// Scenario world for registration and sign-in behaviour tests.
pub struct AccountAccessWorld {
    pub registration: TestRegistration,
    pub verifier: TestVerifier,
    pub last_registration: Option<ServiceResult<IdentityClaim>>,
    pub last_sign_in: Option<ServiceResult<IdentityClaim>>,
    pub next_employee_number: u32,
}

impl AccountAccessWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        // Minimum bcrypt cost keeps hashing fast in tests.
        let hasher = Arc::new(BcryptHasher::with_cost(4));

        Self {
            registration: RegistrationService::new(
                Arc::clone(&users),
                Arc::clone(&hasher),
                Arc::new(DefaultClock),
            ),
            verifier: CredentialVerifier::new(users, hasher),
            last_registration: None,
            last_sign_in: None,
            next_employee_number: 1,
        }
    }

    /// Issues the next scenario-unique employee number.
    pub fn next_employee_id(&mut self) -> String {
        let id = format!("EMP{:03}", self.next_employee_number);
        self.next_employee_number += 1;
        id
    }
}

impl Default for AccountAccessWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AccountAccessWorld {
    AccountAccessWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
