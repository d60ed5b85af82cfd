//! Due date value type with future-dated validation.

use super::TaskDomainError;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task due date, strictly in the future whenever it is set.
///
/// The future check runs only at the moment a caller sets the date;
/// persisted values reload unchecked, so an overdue task round-trips
/// through storage without re-validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(DateTime<Utc>);

impl DueDate {
    /// Creates a due date, validating it lies in the future.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateNotInFuture`] when the moment is
    /// at or before the clock's current time.
    pub fn new(at: DateTime<Utc>, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if at <= clock.utc() {
            return Err(TaskDomainError::DueDateNotInFuture);
        }
        Ok(Self(at))
    }

    /// Reconstructs a due date from persisted storage without validation.
    #[must_use]
    pub const fn from_persisted(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Returns the wrapped moment.
    #[must_use]
    pub const fn value(self) -> DateTime<Utc> {
        self.0
    }

    /// Reports whether the due date lies before the clock's current time.
    #[must_use]
    pub fn is_past(self, clock: &impl Clock) -> bool {
        self.0 < clock.utc()
    }
}
