//! Diesel row models for collaborative task persistence.

use super::schema::tasks;
use crate::identity::adapters::postgres::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Description, possibly empty.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub description: String,
    /// Workflow status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Priority.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub priority: String,
    /// Optional due date.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub due_date: Option<DateTime<Utc>>,
    /// Normalised tags JSON payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub tags: Value,
    /// Creating user.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub created_by: uuid::Uuid,
    /// Optional current assignee.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub assigned_to: Option<uuid::Uuid>,
    /// Archive flag.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub is_archived: bool,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description, possibly empty.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Normalised tags JSON payload.
    pub tags: Value,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Optional current assignee.
    pub assigned_to: Option<uuid::Uuid>,
    /// Archive flag.
    pub is_archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Sparse update model for task records.
///
/// Outer `None` skips the column; `Some(None)` on a nullable column
/// writes SQL `NULL`. `updated_at` is always written, so a change set
/// never produces an empty SQL `SET` clause.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangesRow {
    /// Replacement title, if changed.
    pub title: Option<String>,
    /// Replacement description, if changed.
    pub description: Option<String>,
    /// Replacement workflow status, if changed.
    pub status: Option<String>,
    /// Replacement priority, if changed.
    pub priority: Option<String>,
    /// Replacement or cleared due date, if changed.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Replacement tags JSON payload, if changed.
    pub tags: Option<Value>,
    /// Replacement or cleared assignee, if changed.
    pub assigned_to: Option<Option<uuid::Uuid>>,
    /// Replacement archive flag, if changed.
    pub is_archived: Option<bool>,
    /// Update timestamp, always written.
    pub updated_at: DateTime<Utc>,
}

/// Participant columns loaded for view expansion.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ParticipantRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Canonical email address.
    pub email: String,
}
