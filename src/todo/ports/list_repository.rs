//! Repository port for list persistence.

use super::TodoStoreResult;
use crate::account::domain::UserId;
use crate::todo::domain::{ListId, ListTitle, TodoList};
use async_trait::async_trait;

/// List persistence contract.
///
/// Stores trust that ownership was checked by the caller.
#[async_trait]
pub trait TodoListRepository: Send + Sync {
    /// Stores a new list.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoStoreError::DuplicateList`] when the identifier
    /// already exists.
    async fn store(&self, list: &TodoList) -> TodoStoreResult<()>;

    /// Finds a list by identifier.
    async fn find_by_id(&self, id: ListId) -> TodoStoreResult<Option<TodoList>>;

    /// Returns the owner's lists in creation order.
    async fn list_by_owner(&self, owner_id: UserId) -> TodoStoreResult<Vec<TodoList>>;

    /// Replaces a list's title and returns the updated list.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoStoreError::ListNotFound`] when the list does not
    /// exist.
    async fn update_title(&self, id: ListId, title: &ListTitle) -> TodoStoreResult<TodoList>;

    /// Deletes the list and every item in it in one atomic step.
    ///
    /// Returns the number of items removed.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoStoreError::ListNotFound`] when the list does not
    /// exist.
    async fn delete_with_items(&self, id: ListId) -> TodoStoreResult<usize>;
}
