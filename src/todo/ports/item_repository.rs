//! Repository port for the item tree.

use super::TodoStoreResult;
use crate::todo::domain::{CompletionOutcome, ItemChanges, ItemDraft, ItemId, ListId, TodoItem};
use async_trait::async_trait;

/// Item tree persistence contract.
///
/// Every mutating operation is atomic: either all of its effects are
/// visible afterwards or none are. Sequences are returned in insertion
/// order.
#[async_trait]
pub trait TodoItemRepository: Send + Sync {
    /// Creates an item from a draft, deriving its level from the parent.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoStoreError::ListNotFound`] or
    /// [`super::TodoStoreError::ParentNotFound`] for missing references, and
    /// [`super::TodoStoreError::Rule`] when the parent is too deep or lives in
    /// another list.
    async fn create(&self, draft: ItemDraft) -> TodoStoreResult<TodoItem>;

    /// Finds an item by identifier.
    async fn find_by_id(&self, id: ItemId) -> TodoStoreResult<Option<TodoItem>>;

    /// Returns the direct children of an item.
    async fn find_children(&self, id: ItemId) -> TodoStoreResult<Vec<TodoItem>>;

    /// Returns the top-level items of a list.
    async fn find_roots(&self, list_id: ListId) -> TodoStoreResult<Vec<TodoItem>>;

    /// Returns every item of a list.
    async fn find_by_list(&self, list_id: ListId) -> TodoStoreResult<Vec<TodoItem>>;

    /// Returns the item followed by all of its descendants.
    ///
    /// Returns an empty vector when the item does not exist.
    async fn find_subtree(&self, id: ItemId) -> TodoStoreResult<Vec<TodoItem>>;

    /// Applies a partial update and returns the updated item.
    ///
    /// A top-level item moved to another list takes its subtree with it.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoStoreError::ItemNotFound`] or
    /// [`super::TodoStoreError::ListNotFound`] for missing references, and
    /// [`super::TodoStoreError::Rule`] when the change breaks a hierarchy rule.
    async fn update(&self, id: ItemId, changes: ItemChanges) -> TodoStoreResult<TodoItem>;

    /// Deletes an item and all of its descendants.
    ///
    /// Returns the number of items removed.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoStoreError::ItemNotFound`] when the item does not
    /// exist.
    async fn delete_subtree(&self, id: ItemId) -> TodoStoreResult<usize>;

    /// Completes an item following
    /// [`plan_completion`](crate::todo::domain::plan_completion).
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoStoreError::ItemNotFound`] when the item does not
    /// exist (including when a concurrent completion already removed it) and
    /// [`super::TodoStoreError::Rule`] when children are unfinished.
    async fn complete(&self, id: ItemId) -> TodoStoreResult<CompletionOutcome>;
}
