//! `PostgreSQL` repository implementation for user account storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::identity::{
    domain::{EmailAddress, EmployeeId, PasswordHash, PersistedUserData, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by identity adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: UserPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &User) -> UserRepositoryResult<()> {
        let email = user.email().clone();
        let employee_id = user.employee_id().clone();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateEmployeeId(employee_id.clone())
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let lookup_email = email.clone();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup_email.as_str()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        employee_id: user.employee_id().as_str().to_owned(),
        first_name: user.first_name().to_owned(),
        last_name: user.last_name().to_owned(),
        email: user.email().as_str().to_owned(),
        department: user.department().to_owned(),
        position: user.position().to_owned(),
        password_hash: user.password_hash().as_str().to_owned(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        employee_id: persisted_employee_id,
        first_name,
        last_name,
        email: persisted_email,
        department,
        position,
        password_hash,
        created_at,
        updated_at,
    } = row;

    let employee_id =
        EmployeeId::new(persisted_employee_id).map_err(UserRepositoryError::persistence)?;
    let email = EmailAddress::new(persisted_email).map_err(UserRepositoryError::persistence)?;

    let data = PersistedUserData {
        id: UserId::from_uuid(id),
        employee_id,
        first_name,
        last_name,
        email,
        department,
        position,
        password_hash: PasswordHash::new(password_hash),
        created_at,
        updated_at,
    };
    Ok(User::from_persisted(data))
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "users_email_unique")
}
