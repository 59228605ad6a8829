//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email lookups are exact matches. The `users.email` UNIQUE constraint is
//! the final arbiter of duplicates; a violation on insert is reported as
//! [`UserPersistenceError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, NewUser, PasswordDigest, User, UserId, UserName, UserValidationError,
};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

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

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    if is_unique_violation(&error) {
        return UserPersistenceError::duplicate_email();
    }
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let invalid =
        |err: UserValidationError| UserPersistenceError::query(format!("invalid user row: {err}"));
    Ok(User {
        id: UserId::from(row.id),
        name: UserName::new(row.name).map_err(invalid)?,
        email: EmailAddress::parse(row.email).map_err(invalid)?,
        password: PasswordDigest::new(row.password).map_err(invalid)?,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<UserId, UserPersistenceError> {
        let id = Uuid::new_v4();
        let row = NewUserRow {
            id,
            name: user.name.as_ref(),
            email: user.email.as_ref(),
            password: user.password.as_ref(),
        };

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(UserId::from(id))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and error mapping.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn unique_violation_is_a_duplicate_email() {
        let err = diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        ));
        assert_eq!(err, UserPersistenceError::DuplicateEmail);
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let err = diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn rows_convert_to_users() {
        let id = Uuid::new_v4();
        let user = row_to_user(UserRow {
            id,
            name: "User".into(),
            email: "user@nextmail.com".into(),
            password: "$2b$10$digest".into(),
        })
        .expect("valid row");
        assert_eq!(user.id, UserId::from(id));
        assert_eq!(user.email.as_ref(), "user@nextmail.com");
    }

    #[rstest]
    fn rows_with_empty_digests_are_rejected() {
        let err = row_to_user(UserRow {
            id: Uuid::new_v4(),
            name: "User".into(),
            email: "user@nextmail.com".into(),
            password: String::new(),
        })
        .expect_err("empty digest");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
