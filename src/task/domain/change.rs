//! Sparse change set applied to tasks on update.

use super::{DueDate, TagSet, TaskDescription, TaskPriority, TaskStatus, TaskTitle};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Tri-state patch for a nullable field.
///
/// Distinguishes "leave untouched" from "clear" from "set", so an update
/// payload that omits a field never clears it by accident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the stored value untouched.
    #[default]
    Keep,
    /// Clear the stored value.
    Clear,
    /// Replace the stored value.
    Set(T),
}

impl<T> Patch<T> {
    /// Reports whether the patch leaves the field untouched.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Applies the patch to a nullable slot.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value),
        }
    }
}

/// Field-level sparse change set for a task.
///
/// Only fields explicitly recorded here change when the set is applied;
/// everything else keeps its stored value. Concurrent updates therefore
/// resolve last-write-wins per field, not per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChangeSet {
    title: Option<TaskTitle>,
    description: Option<TaskDescription>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date: Patch<DueDate>,
    tags: Option<TagSet>,
    assigned_to: Patch<UserId>,
    is_archived: Option<bool>,
    touched_at: DateTime<Utc>,
}

impl TaskChangeSet {
    /// Creates an empty change set stamped with the current time.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            title: None,
            description: None,
            status: None,
            priority: None,
            due_date: Patch::Keep,
            tags: None,
            assigned_to: Patch::Keep,
            is_archived: None,
            touched_at: clock.utc(),
        }
    }

    /// Records a title replacement.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Records a description replacement.
    #[must_use]
    pub fn with_description(mut self, description: TaskDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Records a status replacement.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Records a priority replacement.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Records a due date replacement.
    #[must_use]
    pub const fn set_due_date(mut self, due_date: DueDate) -> Self {
        self.due_date = Patch::Set(due_date);
        self
    }

    /// Records clearing the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Patch::Clear;
        self
    }

    /// Records a whole-collection tag replacement (no merge).
    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Records an assignee replacement.
    #[must_use]
    pub const fn set_assignee(mut self, assignee: UserId) -> Self {
        self.assigned_to = Patch::Set(assignee);
        self
    }

    /// Records clearing the assignee.
    #[must_use]
    pub const fn clear_assignee(mut self) -> Self {
        self.assigned_to = Patch::Clear;
        self
    }

    /// Records an archive-flag replacement.
    #[must_use]
    pub const fn with_archived(mut self, is_archived: bool) -> Self {
        self.is_archived = Some(is_archived);
        self
    }

    /// Returns the recorded title replacement, if any.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the recorded description replacement, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the recorded status replacement, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the recorded priority replacement, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the due date patch.
    #[must_use]
    pub const fn due_date(&self) -> Patch<DueDate> {
        self.due_date
    }

    /// Returns the recorded tag replacement, if any.
    #[must_use]
    pub const fn tags(&self) -> Option<&TagSet> {
        self.tags.as_ref()
    }

    /// Returns the assignee patch.
    #[must_use]
    pub const fn assigned_to(&self) -> Patch<UserId> {
        self.assigned_to
    }

    /// Returns the recorded archive-flag replacement, if any.
    #[must_use]
    pub const fn is_archived(&self) -> Option<bool> {
        self.is_archived
    }

    /// Returns the timestamp stamped onto the task on apply.
    #[must_use]
    pub const fn touched_at(&self) -> DateTime<Utc> {
        self.touched_at
    }

    /// Reports whether the set records no field changes.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_keep()
            && self.tags.is_none()
            && self.assigned_to.is_keep()
            && self.is_archived.is_none()
    }
}
