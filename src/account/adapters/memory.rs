//! In-memory user repository for tests and embedded use.

use crate::account::{
    domain::{EmailAddress, User, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    username_index: HashMap<Username, UserId>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lookup(state: &InMemoryUserState, id: Option<&UserId>) -> Option<User> {
    id.and_then(|user_id| state.users.get(user_id)).cloned()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.username_index.contains_key(user.username()) {
            return Err(UserRepositoryError::DuplicateUsername(
                user.username().clone(),
            ));
        }
        if state.email_index.contains_key(user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        state
            .username_index
            .insert(user.username().clone(), user.id());
        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(lookup(&state, state.username_index.get(username)))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(lookup(&state, state.email_index.get(email)))
    }
}
