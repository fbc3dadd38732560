//! Shared helpers for in-memory integration tests.

use rstest::fixture;
use std::sync::Arc;
use tasktree::account::{
    domain::{Password, PasswordHash, User},
    ports::{PasswordHasher, PasswordHasherError},
    services::RegisterUserRequest,
};
use tasktree::app::InMemoryTodoApp;
use tasktree::todo::{
    domain::{TodoItem, TodoList},
    services::CreateItemRequest,
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Deterministic hasher standing in for the credential store.
#[derive(Debug, Default)]
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        PasswordHash::new(format!("plain${}", password.expose()))
            .map_err(|err| PasswordHasherError(err.to_string()))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        Ok(hash.as_str() == format!("plain${}", password.expose()))
    }
}

pub type TestApp = InMemoryTodoApp<PlainHasher>;

/// Fresh application with empty stores.
#[fixture]
pub fn app() -> TestApp {
    InMemoryTodoApp::in_memory(Arc::new(PlainHasher))
}

/// Registers a user whose e-mail is derived from the username.
///
/// # Errors
///
/// Returns an error if registration fails.
pub async fn register(app: &TestApp, username: &str) -> Result<User, BoxError> {
    let user = app
        .accounts()
        .register(RegisterUserRequest::new(
            username,
            format!("{username}@example.com"),
            "correct horse",
        ))
        .await?;
    Ok(user)
}

/// Creates a list owned by `user`.
///
/// # Errors
///
/// Returns an error if the list cannot be created.
pub async fn list_for(app: &TestApp, user: &User, title: &str) -> Result<TodoList, BoxError> {
    Ok(app.lists().create_list(user.id(), title).await?)
}

/// Adds an item to `list`, optionally beneath `parent`.
///
/// # Errors
///
/// Returns an error if the item cannot be created.
pub async fn add_item(
    app: &TestApp,
    user: &User,
    list: &TodoList,
    content: &str,
    parent: Option<&TodoItem>,
) -> Result<TodoItem, BoxError> {
    let mut request = CreateItemRequest::new(list.id(), content);
    if let Some(parent_item) = parent {
        request = request.with_parent(parent_item.id());
    }
    Ok(app.items().create_item(user.id(), request).await?)
}
