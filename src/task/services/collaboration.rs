//! Service layer for session-scoped task collaboration.
//!
//! Every operation resolves the acting user from the session claim before
//! touching task state, so a revoked or stale account is rejected even
//! when the claim itself still parses.

use crate::identity::{
    domain::{Session, User, UserId},
    ports::UserRepository,
    services::UserDirectory,
};
use crate::outcome::{ServiceError, ServiceResult};
use crate::task::{
    domain::{
        DueDate, NewTaskData, Patch, TagSet, Task, TaskChangeSet, TaskDescription, TaskDomainError,
        TaskId, TaskPriority, TaskStatus, TaskTitle, TaskView,
    },
    ports::TaskRepository,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
///
/// Status, priority, and due date arrive as raw strings from the caller
/// and are parsed during creation; omitted fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    due_date: Option<String>,
    tags: Vec<String>,
    assigned_to: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
            priority: None,
            due_date: None,
            tags: Vec::new(),
            assigned_to: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial workflow status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the due date, RFC 3339 or `YYYY-MM-DD`.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Names an assignee by email address.
    ///
    /// A blank reference leaves the default in place: the task is
    /// assigned to its creator.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Some(assignee.into());
        self
    }
}

/// Request payload for a sparse task update.
///
/// Fields left unset are not touched. The nullable `due_date` and
/// `assigned_to` fields carry a tri-state patch so callers can clear them
/// without that being confused with leaving them alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    due_date: Patch<String>,
    tags: Option<Vec<String>>,
    assigned_to: Patch<String>,
    is_archived: Option<bool>,
}

impl UpdateTaskRequest {
    /// Creates an empty update for the given task.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            status: None,
            priority: None,
            due_date: Patch::Keep,
            tags: None,
            assigned_to: Patch::Keep,
            is_archived: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the workflow status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the due date, RFC 3339 or `YYYY-MM-DD`.
    ///
    /// A blank value clears the due date instead.
    #[must_use]
    pub fn set_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Patch::Set(due_date.into());
        self
    }

    /// Clears the due date.
    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Patch::Clear;
        self
    }

    /// Replaces the whole tag collection (no merge).
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Reassigns the task, by email address or raw user identifier.
    ///
    /// A blank reference clears the assignee instead.
    #[must_use]
    pub fn set_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Patch::Set(assignee.into());
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub fn clear_assignee(mut self) -> Self {
        self.assigned_to = Patch::Clear;
        self
    }

    /// Replaces the archive flag.
    #[must_use]
    pub const fn with_archived(mut self, is_archived: bool) -> Self {
        self.is_archived = Some(is_archived);
        self
    }
}

/// Session-scoped task collaboration service.
#[derive(Clone)]
pub struct TaskCollaborationService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    directory: UserDirectory<U>,
    clock: Arc<C>,
}

impl<T, U, C> TaskCollaborationService<T, U, C>
where
    T: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task collaboration service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, directory: UserDirectory<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            directory,
            clock,
        }
    }

    /// Creates a task owned by the session user.
    ///
    /// The assignee defaults to the creator when the request names nobody.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] for an anonymous session,
    /// [`ServiceError::NotFound`] when the session user or named assignee
    /// no longer exists, and [`ServiceError::Validation`] when a field
    /// fails validation.
    pub async fn create_task(
        &self,
        session: &Session,
        request: CreateTaskRequest,
    ) -> ServiceResult<TaskView> {
        let actor = self.resolve_actor(session, "create tasks").await?;

        let title = TaskTitle::new(request.title)?;
        let description = match request.description {
            Some(raw) => TaskDescription::new(raw)?,
            None => TaskDescription::empty(),
        };
        let status = parse_status(request.status.as_deref())?;
        let priority = parse_priority(request.priority.as_deref())?;
        let due_date = match request.due_date {
            Some(raw) => Some(self.parse_due_date(&raw)?),
            None => None,
        };
        let tags = TagSet::new(request.tags);
        let assigned_to = match request.assigned_to {
            Some(ref reference) if !reference.trim().is_empty() => {
                self.directory.resolve_by_email(reference).await?.id()
            }
            _ => actor.id(),
        };

        let task = Task::new(
            NewTaskData {
                title,
                description,
                status,
                priority,
                due_date,
                tags,
                created_by: actor.id(),
                assigned_to,
            },
            &*self.clock,
        );
        Ok(self.tasks.insert(&task).await?)
    }

    /// Applies a sparse update to a task.
    ///
    /// Only the creator and the current assignee may update. Permissions
    /// are checked against the stored record before any field is parsed
    /// beyond the task id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] for an anonymous session,
    /// [`ServiceError::NotFound`] when the task or a named assignee does
    /// not exist, [`ServiceError::Forbidden`] when the session user is
    /// neither creator nor assignee, and [`ServiceError::Validation`] when
    /// a field fails validation.
    pub async fn update_task(
        &self,
        session: &Session,
        request: UpdateTaskRequest,
    ) -> ServiceResult<TaskView> {
        let actor = self.resolve_actor(session, "update tasks").await?;
        let task = self
            .tasks
            .find_by_id(request.task_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task not found"))?;
        if !task.can_be_updated_by(actor.id()) {
            return Err(ServiceError::forbidden(
                "You don't have permission to update this task",
            ));
        }

        let mut changes = TaskChangeSet::new(&*self.clock);
        if let Some(raw) = request.title {
            let title = TaskTitle::new(raw).map_err(|err| match err {
                TaskDomainError::EmptyTitle => {
                    ServiceError::validation("Task title cannot be empty")
                }
                other => ServiceError::from(other),
            })?;
            changes = changes.with_title(title);
        }
        if let Some(raw) = request.description {
            changes = changes.with_description(TaskDescription::new(raw)?);
        }
        if let Some(raw) = request.status {
            let status = TaskStatus::try_from(raw.as_str())
                .map_err(|err| ServiceError::validation(err.to_string()))?;
            changes = changes.with_status(status);
        }
        if let Some(raw) = request.priority {
            let priority = TaskPriority::try_from(raw.as_str())
                .map_err(|err| ServiceError::validation(err.to_string()))?;
            changes = changes.with_priority(priority);
        }
        changes = match request.due_date {
            Patch::Keep => changes,
            Patch::Clear => changes.clear_due_date(),
            Patch::Set(raw) => {
                if raw.trim().is_empty() {
                    changes.clear_due_date()
                } else {
                    changes.set_due_date(self.parse_due_date(&raw)?)
                }
            }
        };
        if let Some(raw_tags) = request.tags {
            changes = changes.with_tags(TagSet::new(raw_tags));
        }
        changes = match request.assigned_to {
            Patch::Keep => changes,
            Patch::Clear => changes.clear_assignee(),
            Patch::Set(raw) => {
                if raw.trim().is_empty() {
                    changes.clear_assignee()
                } else {
                    changes.set_assignee(self.resolve_assignee(&raw).await?)
                }
            }
        };
        if let Some(is_archived) = request.is_archived {
            changes = changes.with_archived(is_archived);
        }

        Ok(self.tasks.update(request.task_id, &changes).await?)
    }

    /// Deletes a task.
    ///
    /// Deletion is reserved to the creator; the assignee may not delete.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] for an anonymous session,
    /// [`ServiceError::NotFound`] when the task does not exist, and
    /// [`ServiceError::Forbidden`] when the session user is not the
    /// creator.
    pub async fn delete_task(&self, session: &Session, id: TaskId) -> ServiceResult<()> {
        let actor = self.resolve_actor(session, "delete tasks").await?;
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task not found"))?;
        if !task.can_be_deleted_by(actor.id()) {
            return Err(ServiceError::forbidden(
                "You can only delete tasks that you created",
            ));
        }
        self.tasks.delete(id).await?;
        Ok(())
    }

    /// Lists the session user's tasks, newest first.
    ///
    /// Returns tasks the user created alongside tasks assigned to them.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] for an anonymous session and
    /// [`ServiceError::NotFound`] when the session user no longer exists.
    pub async fn list_tasks(&self, session: &Session) -> ServiceResult<Vec<TaskView>> {
        let actor = self.resolve_actor(session, "view tasks").await?;
        Ok(self.tasks.find_by_creator_or_assignee(actor.id()).await?)
    }

    /// Resolves the acting user behind the session claim.
    ///
    /// The stored account is looked up afresh on every call; a claim whose
    /// account has since been removed maps to `NotFound` rather than
    /// leaking the directory's email-specific message.
    async fn resolve_actor(&self, session: &Session, action: &str) -> ServiceResult<User> {
        let claim = session.claim().ok_or_else(|| {
            ServiceError::unauthorized(format!("Unauthorized: Please sign in to {action}"))
        })?;
        self.directory
            .resolve_by_email(claim.email.as_str())
            .await
            .map_err(|err| match err {
                ServiceError::NotFound(_) => ServiceError::not_found("User not found"),
                other => other,
            })
    }

    /// Resolves an assignee reference: email first, raw identifier second.
    async fn resolve_assignee(&self, reference: &str) -> ServiceResult<UserId> {
        match self.directory.resolve_by_email(reference).await {
            Ok(user) => return Ok(user.id()),
            Err(ServiceError::NotFound(_)) => {}
            Err(other) => return Err(other),
        }
        if let Ok(id) = reference.parse::<UserId>() {
            match self.directory.resolve_by_id(id).await {
                Ok(user) => return Ok(user.id()),
                Err(ServiceError::NotFound(_)) => {}
                Err(other) => return Err(other),
            }
        }
        Err(ServiceError::not_found(format!(
            "User with email/ID {reference} not found"
        )))
    }

    fn parse_due_date(&self, raw: &str) -> ServiceResult<DueDate> {
        let parsed = parse_timestamp(raw)
            .ok_or_else(|| ServiceError::validation(format!("invalid due date: {raw}")))?;
        Ok(DueDate::new(parsed, &*self.clock)?)
    }
}

fn parse_status(raw: Option<&str>) -> ServiceResult<TaskStatus> {
    raw.map_or(Ok(TaskStatus::default()), |value| {
        TaskStatus::try_from(value).map_err(|err| ServiceError::validation(err.to_string()))
    })
}

fn parse_priority(raw: Option<&str>) -> ServiceResult<TaskPriority> {
    raw.map_or(Ok(TaskPriority::default()), |value| {
        TaskPriority::try_from(value).map_err(|err| ServiceError::validation(err.to_string()))
    })
}

/// Parses a caller-supplied timestamp, RFC 3339 or bare `YYYY-MM-DD`.
///
/// Bare dates are taken as midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}
