//! Domain model for collaborative task tracking.
//!
//! The task domain models validated task fields, ownership-based
//! permission rules, and field-level sparse updates while keeping all
//! infrastructure concerns outside of the domain boundary.

mod change;
mod due;
mod error;
mod fields;
mod ids;
mod status;
mod task;
mod view;

pub use change::{Patch, TaskChangeSet};
pub use due::DueDate;
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use fields::{TagSet, TaskDescription, TaskTitle};
pub use ids::TaskId;
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTaskData, PersistedTaskData, Task};
pub use view::TaskView;
