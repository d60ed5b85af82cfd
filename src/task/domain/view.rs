//! Read model returned by task operations.

use super::{DueDate, TagSet, TaskDescription, TaskId, TaskPriority, TaskStatus, TaskTitle};
use crate::identity::domain::UserSummary;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Task read model with participants expanded to summaries.
///
/// This is what service operations hand to callers: the stored fields
/// plus `created_by`/`assigned_to` resolved from identifiers to
/// name/email projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: TaskTitle,
    /// Description, possibly empty.
    pub description: TaskDescription,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Due date, if any.
    pub due_date: Option<DueDate>,
    /// Normalised tags.
    pub tags: TagSet,
    /// Creating user, expanded.
    pub created_by: UserSummary,
    /// Current assignee, expanded, if any.
    pub assigned_to: Option<UserSummary>,
    /// Archive flag.
    pub is_archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskView {
    /// Reports whether the task is overdue.
    ///
    /// True iff a due date is set, it lies in the past, and the task is
    /// not done.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due.is_past(clock))
    }
}
