//! Application services for identity management.

mod credentials;
mod directory;
mod registration;

pub use credentials::CredentialVerifier;
pub use directory::UserDirectory;
pub use registration::{RegisterUserRequest, RegistrationService};
