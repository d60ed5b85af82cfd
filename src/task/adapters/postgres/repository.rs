//! `PostgreSQL` repository implementation for collaborative task storage.

use std::collections::HashMap;

use super::{
    models::{NewTaskRow, ParticipantRow, TaskChangesRow, TaskRow},
    schema::tasks,
};
use crate::identity::adapters::postgres::schema::users;
use crate::identity::domain::{EmailAddress, UserId, UserSummary};
use crate::task::{
    domain::{
        DueDate, Patch, PersistedTaskData, TagSet, Task, TaskChangeSet, TaskDescription, TaskId,
        TaskPriority, TaskStatus, TaskTitle, TaskView,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Participant expansion reads from the `users` table owned by the
/// identity adapters; the foreign keys on `created_by` and `assigned_to`
/// reject writes that reference no stored user.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<TaskView> {
        let task_id = task.id();
        let creator = task.created_by();
        let assignee = task.assigned_to();
        let record = task.clone();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| {
                    let participant = match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            return TaskRepositoryError::DuplicateTask(task_id);
                        }
                        DieselError::DatabaseError(
                            DatabaseErrorKind::ForeignKeyViolation,
                            ref info,
                        ) => participant_for_violation(info.as_ref(), creator, assignee),
                        _ => None,
                    };
                    participant.map_or_else(
                        || TaskRepositoryError::persistence(err),
                        TaskRepositoryError::MissingParticipant,
                    )
                })?;

            expand_task(connection, record)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = load_task_row(connection, id)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_creator_or_assignee(
        &self,
        user: UserId,
    ) -> TaskRepositoryResult<Vec<TaskView>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(
                    tasks::created_by
                        .eq(user.into_inner())
                        .nullable()
                        .or(tasks::assigned_to.eq(user.into_inner())),
                )
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let mut records = Vec::with_capacity(rows.len());
            for row in rows {
                records.push(row_to_task(row)?);
            }

            let summaries = load_summaries(connection, &participant_ids(&records))?;
            assemble_views(records, &summaries)
        })
        .await
    }

    async fn update(&self, id: TaskId, changes: &TaskChangeSet) -> TaskRepositoryResult<TaskView> {
        let pending_assignee = match changes.assigned_to() {
            Patch::Set(user) => Some(user),
            Patch::Keep | Patch::Clear => None,
        };
        let changes_row = to_changes_row(changes)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(&changes_row)
                .execute(connection)
                .map_err(|err| {
                    let participant = match err {
                        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                            pending_assignee
                        }
                        _ => None,
                    };
                    participant.map_or_else(
                        || TaskRepositoryError::persistence(err),
                        TaskRepositoryError::MissingParticipant,
                    )
                })?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }

            let row = load_task_row(connection, id)?.ok_or(TaskRepositoryError::NotFound(id))?;
            let task = row_to_task(row)?;
            expand_task(connection, task)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let tags =
        serde_json::to_value(task.tags().as_slice()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date().map(DueDate::value),
        tags,
        created_by: task.created_by().into_inner(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        is_archived: task.is_archived(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changes_row(changes: &TaskChangeSet) -> TaskRepositoryResult<TaskChangesRow> {
    let tags = changes
        .tags()
        .map(|tags| serde_json::to_value(tags.as_slice()))
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(TaskChangesRow {
        title: changes.title().map(|title| title.as_str().to_owned()),
        description: changes
            .description()
            .map(|description| description.as_str().to_owned()),
        status: changes.status().map(|status| status.as_str().to_owned()),
        priority: changes
            .priority()
            .map(|priority| priority.as_str().to_owned()),
        due_date: patch_column(changes.due_date(), DueDate::value),
        tags,
        assigned_to: patch_column(changes.assigned_to(), UserId::into_inner),
        is_archived: changes.is_archived(),
        updated_at: changes.touched_at(),
    })
}

/// Maps a tri-state patch onto diesel's nested-option changeset column.
fn patch_column<T, U>(patch: Patch<T>, convert: impl FnOnce(T) -> U) -> Option<Option<U>> {
    match patch {
        Patch::Keep => None,
        Patch::Clear => Some(None),
        Patch::Set(value) => Some(Some(convert(value))),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description: persisted_description,
        status: persisted_status,
        priority: persisted_priority,
        due_date,
        tags: persisted_tags,
        created_by,
        assigned_to,
        is_archived,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let description =
        TaskDescription::new(persisted_description).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let tag_values = serde_json::from_value::<Vec<String>>(persisted_tags)
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        priority,
        due_date: due_date.map(DueDate::from_persisted),
        tags: TagSet::new(tag_values),
        created_by: UserId::from_uuid(created_by),
        assigned_to: assigned_to.map(UserId::from_uuid),
        is_archived,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn load_task_row(
    connection: &mut PgConnection,
    id: TaskId,
) -> TaskRepositoryResult<Option<TaskRow>> {
    tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)
}

fn expand_task(connection: &mut PgConnection, task: Task) -> TaskRepositoryResult<TaskView> {
    let created_by = load_summary(connection, task.created_by())?;
    let assigned_to = task
        .assigned_to()
        .map(|user| load_summary(connection, user))
        .transpose()?;
    Ok(task.into_view(created_by, assigned_to))
}

fn load_summary(connection: &mut PgConnection, user: UserId) -> TaskRepositoryResult<UserSummary> {
    let row = users::table
        .filter(users::id.eq(user.into_inner()))
        .select(ParticipantRow::as_select())
        .first::<ParticipantRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)?;
    let participant = row.ok_or(TaskRepositoryError::MissingParticipant(user))?;
    participant_summary(participant)
}

fn load_summaries(
    connection: &mut PgConnection,
    participants: &[UserId],
) -> TaskRepositoryResult<HashMap<UserId, UserSummary>> {
    if participants.is_empty() {
        return Ok(HashMap::new());
    }

    let ids: Vec<uuid::Uuid> = participants.iter().map(|user| user.into_inner()).collect();
    let rows = users::table
        .filter(users::id.eq_any(&ids))
        .select(ParticipantRow::as_select())
        .load::<ParticipantRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;

    let mut summaries = HashMap::with_capacity(rows.len());
    for row in rows {
        let user = UserId::from_uuid(row.id);
        summaries.insert(user, participant_summary(row)?);
    }
    Ok(summaries)
}

fn participant_summary(row: ParticipantRow) -> TaskRepositoryResult<UserSummary> {
    let email = EmailAddress::new(row.email).map_err(TaskRepositoryError::persistence)?;
    Ok(UserSummary {
        name: format!("{} {}", row.first_name, row.last_name),
        email,
    })
}

fn participant_ids(records: &[Task]) -> Vec<UserId> {
    let mut ids: Vec<UserId> = records
        .iter()
        .flat_map(|task| std::iter::once(task.created_by()).chain(task.assigned_to()))
        .collect();
    ids.sort_unstable_by_key(|user| user.into_inner());
    ids.dedup();
    ids
}

fn assemble_views(
    records: Vec<Task>,
    summaries: &HashMap<UserId, UserSummary>,
) -> TaskRepositoryResult<Vec<TaskView>> {
    let mut views = Vec::with_capacity(records.len());
    for task in records {
        let created_by = summary_from(summaries, task.created_by())?;
        let assigned_to = task
            .assigned_to()
            .map(|assignee| summary_from(summaries, assignee))
            .transpose()?;
        views.push(task.into_view(created_by, assigned_to));
    }
    Ok(views)
}

fn summary_from(
    summaries: &HashMap<UserId, UserSummary>,
    user: UserId,
) -> TaskRepositoryResult<UserSummary> {
    summaries
        .get(&user)
        .cloned()
        .ok_or(TaskRepositoryError::MissingParticipant(user))
}

fn participant_for_violation(
    info: &dyn DatabaseErrorInformation,
    creator: UserId,
    assignee: Option<UserId>,
) -> Option<UserId> {
    match info.constraint_name() {
        Some("tasks_created_by_fkey") => Some(creator),
        Some("tasks_assigned_to_fkey") => assignee,
        _ => None,
    }
}
