//! Shared world state for item completion BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use rstest::fixture;
use tasktree::account::{
    domain::{Password, PasswordHash, User},
    ports::{PasswordHasher, PasswordHasherError},
};
use tasktree::app::InMemoryTodoApp;
use tasktree::todo::{
    domain::{CompletionOutcome, TodoItem, TodoList},
    services::TodoServiceError,
};

/// Hasher that stores passwords with a fixed prefix.
#[derive(Debug, Default)]
pub struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        PasswordHash::new(format!("bdd:{}", password.expose()))
            .map_err(|err| PasswordHasherError(err.to_string()))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        Ok(hash.as_str() == format!("bdd:{}", password.expose()))
    }
}

/// Scenario world for item completion behaviour tests.
pub struct ItemCompletionWorld {
    pub app: InMemoryTodoApp<PrefixHasher>,
    pub user: Option<User>,
    pub list: Option<TodoList>,
    pub items: HashMap<String, TodoItem>,
    pub last_completion: Option<Result<CompletionOutcome, TodoServiceError>>,
    pub last_creation: Option<Result<TodoItem, TodoServiceError>>,
}

impl ItemCompletionWorld {
    /// Creates a world backed by fresh in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            app: InMemoryTodoApp::in_memory(Arc::new(PrefixHasher)),
            user: None,
            list: None,
            items: HashMap::new(),
            last_completion: None,
            last_creation: None,
        }
    }

    /// Returns the scenario user.
    ///
    /// # Errors
    ///
    /// Returns an error when no user has been registered yet.
    pub fn user(&self) -> Result<&User, eyre::Report> {
        self.user
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing user in scenario world"))
    }

    /// Returns the scenario list.
    ///
    /// # Errors
    ///
    /// Returns an error when no list has been created yet.
    pub fn list(&self) -> Result<&TodoList, eyre::Report> {
        self.list
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing list in scenario world"))
    }

    /// Looks up an item created earlier in the scenario by its content.
    ///
    /// # Errors
    ///
    /// Returns an error when no item with that content was created.
    pub fn item(&self, content: &str) -> Result<&TodoItem, eyre::Report> {
        self.items
            .get(content)
            .ok_or_else(|| eyre::eyre!("no item named {content:?} in scenario world"))
    }
}

impl Default for ItemCompletionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ItemCompletionWorld {
    ItemCompletionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
