//! Authenticated identity data carried by sessions.

use super::{EmailAddress, EmployeeId, UserId};
use serde::{Deserialize, Serialize};

/// Snapshot of the signed-in user attached to a session.
///
/// Claims are produced from a [`super::User`] at sign-in and carry only the
/// profile data downstream operations read, never the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// Identifier of the authenticated user.
    pub user_id: UserId,
    /// Canonical email address of the authenticated user.
    pub email: EmailAddress,
    /// Employee number of the authenticated user.
    pub employee_id: EmployeeId,
    /// Display name, first and last name joined by a space.
    pub name: String,
    /// Department the user belongs to.
    pub department: String,
    /// Job position of the user.
    pub position: String,
}
