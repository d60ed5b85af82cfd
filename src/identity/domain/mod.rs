//! Domain model for user accounts and authentication state.
//!
//! The identity domain models validated account data, password-hash
//! custody, and the session claims attached to callers, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod claim;
mod email;
mod error;
mod ids;
mod password;
mod session;
mod user;

pub use claim::IdentityClaim;
pub use email::EmailAddress;
pub use error::IdentityDomainError;
pub use ids::{EmployeeId, UserId};
pub use password::PasswordHash;
pub use session::Session;
pub use user::{NewUserProfile, PersistedUserData, User, UserSummary, required_text};
