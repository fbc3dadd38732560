//! `PostgreSQL` repository implementation for user storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::account::{
    domain::{EmailAddress, PasswordHash, User, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by account adapters.
pub type AccountPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: AccountPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AccountPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, operation: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            operation(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let username = user.username().clone();
        let email = user.email().clone();
        let new_row = NewUserRow {
            id: user_id.into_inner(),
            username: username.as_str().to_owned(),
            email: email.as_str().to_owned(),
            password_hash: user.password_hash().as_str().to_owned(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) => {
                        match info.constraint_name() {
                            Some(USERNAME_CONSTRAINT) => {
                                UserRepositoryError::DuplicateUsername(username.clone())
                            }
                            Some(EMAIL_CONSTRAINT) => {
                                UserRepositoryError::DuplicateEmail(email.clone())
                            }
                            _ => UserRepositoryError::DuplicateUser(user_id),
                        }
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

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let name = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::username.eq(&name))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let address = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(&address))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

const USERNAME_CONSTRAINT: &str = "users_username_unique";
const EMAIL_CONSTRAINT: &str = "users_email_unique";

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        username,
        email,
        password_hash,
    } = row;

    let parsed_username =
        Username::new(username).map_err(UserRepositoryError::invalid_persisted_data)?;
    let parsed_email =
        EmailAddress::new(email).map_err(UserRepositoryError::invalid_persisted_data)?;
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(UserRepositoryError::invalid_persisted_data)?;

    Ok(User::from_persisted(
        UserId::from_uuid(id),
        parsed_username,
        parsed_email,
        parsed_hash,
    ))
}
