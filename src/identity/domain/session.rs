//! Caller session passed into every protected operation.

use super::{IdentityClaim, UserId};

/// Authentication context of the calling user.
///
/// Protected operations take a session by reference and decide between the
/// anonymous and authenticated states themselves, so there is no ambient
/// sign-in state anywhere in the crate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    claim: Option<IdentityClaim>,
}

impl Session {
    /// Creates a session with no signed-in user.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { claim: None }
    }

    /// Creates a session for an authenticated user.
    #[must_use]
    pub const fn authenticated(claim: IdentityClaim) -> Self {
        Self { claim: Some(claim) }
    }

    /// Returns the identity claim, if any.
    #[must_use]
    pub const fn claim(&self) -> Option<&IdentityClaim> {
        self.claim.as_ref()
    }

    /// Reports whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.claim.is_some()
    }

    /// Returns the signed-in user's identifier, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.claim.as_ref().map(|claim| claim.user_id)
    }
}
