//! Diesel row models for user account persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user account records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Organisation-assigned employee number.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub employee_id: String,
    /// Given name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub first_name: String,
    /// Family name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub last_name: String,
    /// Canonical email address.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub email: String,
    /// Department the user belongs to.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub department: String,
    /// Job position.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub position: String,
    /// Password digest produced by the hashing adapter.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub password_hash: String,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for user account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Organisation-assigned employee number.
    pub employee_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Canonical email address.
    pub email: String,
    /// Department the user belongs to.
    pub department: String,
    /// Job position.
    pub position: String,
    /// Password digest produced by the hashing adapter.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
