//! In-memory repository for collaborative task storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::adapters::memory::InMemoryUserRepository;
use crate::identity::domain::{UserId, UserSummary};
use crate::identity::ports::UserRepository;
use crate::task::{
    domain::{Patch, Task, TaskChangeSet, TaskId, TaskView},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Participant expansion reads from the user repository handed in at
/// construction; share one [`InMemoryUserRepository`] across the identity
/// services and this repository so both see the same accounts.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
    users: InMemoryUserRepository,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty task repository over a shared user store.
    #[must_use]
    pub fn new(users: InMemoryUserRepository) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            users,
        }
    }

    async fn summary_for(&self, user: UserId) -> TaskRepositoryResult<UserSummary> {
        let found = self
            .users
            .find_by_id(user)
            .await
            .map_err(TaskRepositoryError::persistence)?;
        let stored = found.ok_or(TaskRepositoryError::MissingParticipant(user))?;
        Ok(stored.summary())
    }

    async fn require_participant(&self, user: UserId) -> TaskRepositoryResult<()> {
        let found = self
            .users
            .find_by_id(user)
            .await
            .map_err(TaskRepositoryError::persistence)?;
        if found.is_none() {
            return Err(TaskRepositoryError::MissingParticipant(user));
        }
        Ok(())
    }

    async fn expand(&self, task: Task) -> TaskRepositoryResult<TaskView> {
        let created_by = self.summary_for(task.created_by()).await?;
        let assigned_to = match task.assigned_to() {
            Some(user) => Some(self.summary_for(user).await?),
            None => None,
        };
        Ok(task.into_view(created_by, assigned_to))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<TaskView> {
        // Participants resolve before the write so a dangling reference
        // rejects the insert, as the PostgreSQL foreign keys do.
        let view = self.expand(task.clone()).await?;

        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(view)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_creator_or_assignee(
        &self,
        user: UserId,
    ) -> TaskRepositoryResult<Vec<TaskView>> {
        let mut matches: Vec<Task> = {
            let state = self.state.read().map_err(|err| {
                TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            state
                .tasks
                .values()
                .filter(|task| task.created_by() == user || task.assigned_to() == Some(user))
                .cloned()
                .collect()
        };
        matches.sort_by_key(|task| std::cmp::Reverse(task.created_at()));

        let mut views = Vec::with_capacity(matches.len());
        for task in matches {
            views.push(self.expand(task).await?);
        }
        Ok(views)
    }

    async fn update(&self, id: TaskId, changes: &TaskChangeSet) -> TaskRepositoryResult<TaskView> {
        if let Patch::Set(assignee) = changes.assigned_to() {
            self.require_participant(assignee).await?;
        }

        let updated = {
            let mut state = self.state.write().map_err(|err| {
                TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            let task = state
                .tasks
                .get_mut(&id)
                .ok_or(TaskRepositoryError::NotFound(id))?;
            task.apply(changes);
            task.clone()
        };
        self.expand(updated).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
