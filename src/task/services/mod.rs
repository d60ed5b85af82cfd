//! Application services for task collaboration.

mod collaboration;

pub use collaboration::{CreateTaskRequest, TaskCollaborationService, UpdateTaskRequest};
