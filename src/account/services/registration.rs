//! Service layer for user registration, login and session resolution.

use crate::account::{
    domain::{AccountDomainError, EmailAddress, Password, User, UserId, Username},
    ports::{PasswordHasher, PasswordHasherError, UserRepository, UserRepositoryError},
};
use crate::error::ErrorKind;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    username: String,
    email: String,
    password: String,
}

impl RegisterUserRequest {
    /// Creates a registration request from raw form input.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] AccountDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Hashing or verification failed.
    #[error(transparent)]
    Hasher(#[from] PasswordHasherError),
    /// The username is already registered.
    #[error("username already exists: {0}")]
    UsernameTaken(Username),
    /// The e-mail address is already registered.
    #[error("email already exists: {0}")]
    EmailTaken(EmailAddress),
    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,
    /// No user exists with the given identifier.
    #[error("user {0} not found")]
    NotFound(UserId),
}

impl AccountServiceError {
    /// Classifies the error for the routing layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::UsernameTaken(_) | Self::EmailTaken(_) => ErrorKind::Validation,
            Self::Repository(
                UserRepositoryError::DuplicateUsername(_) | UserRepositoryError::DuplicateEmail(_),
            ) => ErrorKind::Validation,
            Self::InvalidCredentials => ErrorKind::Authentication,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Hasher(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for account service operations.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

/// Account orchestration service.
#[derive(Clone)]
pub struct AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] for malformed input,
    /// [`AccountServiceError::UsernameTaken`] or
    /// [`AccountServiceError::EmailTaken`] when the identity is already in use,
    /// and hasher or repository errors otherwise.
    pub async fn register(&self, request: RegisterUserRequest) -> AccountServiceResult<User> {
        let username = Username::new(request.username)?;
        let email = EmailAddress::new(request.email)?;
        let password = Password::new(request.password)?;

        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AccountServiceError::UsernameTaken(username));
        }
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AccountServiceError::EmailTaken(email));
        }

        let password_hash = self.hasher.hash(&password)?;
        let user = User::register(username, email, password_hash);
        self.repository
            .store(&user)
            .await
            .map_err(|err| match err {
                UserRepositoryError::DuplicateUsername(name) => {
                    AccountServiceError::UsernameTaken(name)
                }
                UserRepositoryError::DuplicateEmail(address) => {
                    AccountServiceError::EmailTaken(address)
                }
                other => AccountServiceError::Repository(other),
            })?;

        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }

    /// Verifies credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::InvalidCredentials`] for an unknown
    /// username or a wrong password.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> AccountServiceResult<User> {
        let (Ok(parsed_username), Ok(parsed_password)) =
            (Username::new(username), Password::new(password))
        else {
            return Err(AccountServiceError::InvalidCredentials);
        };

        let Some(user) = self.repository.find_by_username(&parsed_username).await? else {
            warn!(username = %parsed_username, "login rejected: unknown user");
            return Err(AccountServiceError::InvalidCredentials);
        };

        if !self.hasher.verify(&parsed_password, user.password_hash())? {
            warn!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(AccountServiceError::InvalidCredentials);
        }

        debug!(user_id = %user.id(), "user authenticated");
        Ok(user)
    }

    /// Resolves a session's user identifier to the registered user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotFound`] when no user has the id.
    pub async fn find_user(&self, user_id: UserId) -> AccountServiceResult<User> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or(AccountServiceError::NotFound(user_id))
    }
}
