//! Task aggregate root.

use super::{
    DueDate, TagSet, TaskChangeSet, TaskDescription, TaskId, TaskPriority, TaskStatus, TaskTitle,
    TaskView,
};
use crate::identity::domain::{UserId, UserSummary};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DueDate>,
    tags: TagSet,
    created_by: UserId,
    assigned_to: Option<UserId>,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated field data for creating a new task.
///
/// The assignee is always resolved before construction; a task starts
/// assigned, defaulting to its creator when the caller names nobody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Validated title.
    pub title: TaskTitle,
    /// Validated description, possibly empty.
    pub description: TaskDescription,
    /// Initial workflow status.
    pub status: TaskStatus,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Validated future due date, if any.
    pub due_date: Option<DueDate>,
    /// Normalised tags.
    pub tags: TagSet,
    /// Creating user.
    pub created_by: UserId,
    /// Resolved assignee.
    pub assigned_to: UserId,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date, if any; past values reload unchecked.
    pub due_date: Option<DueDate>,
    /// Persisted tags.
    pub tags: TagSet,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted assignee, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted archive flag.
    pub is_archived: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from validated field data.
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            tags: data.tags,
            created_by: data.created_by,
            assigned_to: Some(data.assigned_to),
            is_archived: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            tags: data.tags,
            created_by: data.created_by,
            assigned_to: data.assigned_to,
            is_archived: data.is_archived,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the archive flag.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.is_archived
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Reports whether the user may update this task.
    ///
    /// Updates are open to the creator and the current assignee.
    #[must_use]
    pub fn can_be_updated_by(&self, user: UserId) -> bool {
        self.created_by == user || self.assigned_to == Some(user)
    }

    /// Reports whether the user may delete this task.
    ///
    /// Deletion is reserved to the creator; the assignee may not delete.
    #[must_use]
    pub fn can_be_deleted_by(&self, user: UserId) -> bool {
        self.created_by == user
    }

    /// Reports whether the task is overdue.
    ///
    /// True iff a due date is set, it lies in the past, and the task is
    /// not done. Computed against the injected clock, never stored.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due.is_past(clock))
    }

    /// Applies a sparse change set, stamping the update timestamp.
    ///
    /// Fields the set does not record keep their stored values.
    pub fn apply(&mut self, changes: &TaskChangeSet) {
        if let Some(title) = changes.title() {
            self.title = title.clone();
        }
        if let Some(description) = changes.description() {
            self.description = description.clone();
        }
        if let Some(status) = changes.status() {
            self.status = status;
        }
        if let Some(priority) = changes.priority() {
            self.priority = priority;
        }
        changes.due_date().apply_to(&mut self.due_date);
        if let Some(tags) = changes.tags() {
            self.tags = tags.clone();
        }
        changes.assigned_to().apply_to(&mut self.assigned_to);
        if let Some(is_archived) = changes.is_archived() {
            self.is_archived = is_archived;
        }
        self.updated_at = changes.touched_at();
    }

    /// Converts the task into its read model, expanding participants.
    #[must_use]
    pub fn into_view(self, created_by: UserSummary, assigned_to: Option<UserSummary>) -> TaskView {
        TaskView {
            id: self.id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            tags: self.tags,
            created_by,
            assigned_to,
            is_archived: self.is_archived,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
