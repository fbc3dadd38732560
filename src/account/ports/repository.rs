//! Repository port for user persistence and lookup.

use crate::account::domain::{EmailAddress, User, UserId, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a newly registered user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`],
    /// [`UserRepositoryError::DuplicateUsername`] or
    /// [`UserRepositoryError::DuplicateEmail`] when a uniqueness rule is
    /// violated.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by e-mail address.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The username is already registered.
    #[error("username already exists: {0}")]
    DuplicateUsername(Username),

    /// The e-mail address is already registered.
    #[error("email already exists: {0}")]
    DuplicateEmail(EmailAddress),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted user data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
