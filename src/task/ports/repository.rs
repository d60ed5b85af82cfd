//! Repository port for task persistence, lookup, and sparse updates.

use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskChangeSet, TaskId, TaskView};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// A pure storage abstraction: no permission logic lives here.
/// Operations returning [`TaskView`] expand participant identifiers to
/// summaries as part of the read.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns its expanded read model.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists and [`TaskRepositoryError::MissingParticipant`] when
    /// a referenced user cannot be expanded.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<TaskView>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks the user created or is assigned to, newest
    /// creation time first, participants expanded.
    async fn find_by_creator_or_assignee(
        &self,
        user: UserId,
    ) -> TaskRepositoryResult<Vec<TaskView>>;

    /// Applies a sparse change set to a stored task and returns the
    /// updated read model.
    ///
    /// Fields the set does not record keep their stored values, so
    /// concurrent updates resolve last-write-wins per field.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, id: TaskId, changes: &TaskChangeSet) -> TaskRepositoryResult<TaskView>;

    /// Deletes a stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A referenced participant has no stored user record.
    #[error("task participant not found: {0}")]
    MissingParticipant(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
