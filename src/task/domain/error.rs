//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
///
/// Variant messages are caller-facing and surface verbatim through the
/// service taxonomy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("Task title is required")]
    EmptyTitle,

    /// The title exceeds the persisted length limit.
    #[error("Title cannot be more than {limit} characters")]
    TitleTooLong {
        /// Maximum number of characters allowed.
        limit: usize,
    },

    /// The description exceeds the persisted length limit.
    #[error("Description cannot be more than {limit} characters")]
    DescriptionTooLong {
        /// Maximum number of characters allowed.
        limit: usize,
    },

    /// A due date was set at or before the current time.
    #[error("Due date must be in the future")]
    DueDateNotInFuture,
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
