//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Uniqueness of contact handles is enforced by the
//! `users_contact_handle_key` constraint; a violation is reported as
//! [`UserPersistenceError::Conflict`] so concurrent registrations for the same
//! handle resolve to exactly one winner.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{ContactHandle, DisplayName, SecretHash, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const CONTACT_HANDLE_CONSTRAINT: &str = "users_contact_handle_key";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.message())
}

fn map_diesel_error(error: DieselError, contact_handle: &ContactHandle) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(CONTACT_HANDLE_CONSTRAINT) =>
        {
            UserPersistenceError::conflict(contact_handle.as_ref())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let secret_hash = SecretHash::new(row.secret_hash).map_err(|err| {
        UserPersistenceError::query(format!("stored account {} is invalid: {err}", row.id))
    })?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        ContactHandle::new(row.contact_handle),
        DisplayName::new(row.display_name),
        secret_hash,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn save(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            contact_handle: user.contact_handle().as_ref(),
            display_name: user.display_name().as_ref(),
            secret_hash: user.secret_hash().as_str(),
        };

        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, user.contact_handle()))?;

        row_to_user(row)
    }

    async fn find_by_contact_handle(
        &self,
        contact_handle: &ContactHandle,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::contact_handle.eq(contact_handle.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, contact_handle))?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Mapping coverage; queries against a live database live in
    //! `tests/diesel_user_repository.rs`.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        let mapped = map_diesel_error(DieselError::NotFound, &ContactHandle::new("a@x.com"));
        assert!(matches!(mapped, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn empty_stored_hash_is_rejected() {
        let row = UserRow {
            id: uuid::Uuid::nil(),
            contact_handle: "a@x.com".into(),
            display_name: "Ada".into(),
            secret_hash: String::new(),
            created_at: chrono::Utc::now(),
        };

        let err = row_to_user(row).expect_err("empty hash must be rejected");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn rows_convert_to_domain_users() {
        let row = UserRow {
            id: uuid::Uuid::nil(),
            contact_handle: "a@x.com".into(),
            display_name: "Ada".into(),
            secret_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".into(),
            created_at: chrono::Utc::now(),
        };

        let user = row_to_user(row).expect("valid row");
        assert_eq!(user.contact_handle().as_ref(), "a@x.com");
        assert_eq!(user.display_name().as_ref(), "Ada");
        assert_eq!(user.id().as_uuid(), &uuid::Uuid::nil());
    }
}
