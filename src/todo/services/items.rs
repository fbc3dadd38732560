//! Service layer for item creation, editing, completion and rendering.

use super::{
    TodoServiceError, TodoServiceResult,
    access::{owned_item, owned_list},
};
use crate::account::domain::UserId;
use crate::todo::{
    domain::{
        CompletionOutcome, ItemChanges, ItemContent, ItemDraft, ItemId, ItemNode, ListId,
        TodoItem, build_forest, build_subtree,
    },
    ports::{TodoItemRepository, TodoListRepository},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Request payload for creating an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateItemRequest {
    list_id: ListId,
    content: String,
    parent_id: Option<ItemId>,
}

impl CreateItemRequest {
    /// Creates a request for a top-level item.
    #[must_use]
    pub fn new(list_id: ListId, content: impl Into<String>) -> Self {
        Self {
            list_id,
            content: content.into(),
            parent_id: None,
        }
    }

    /// Nests the item under `parent_id`.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: ItemId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// Request payload for a partial item update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateItemRequest {
    content: Option<String>,
    completed: Option<bool>,
    collapsed: Option<bool>,
    list_id: Option<ListId>,
}

impl UpdateItemRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the collapse flag.
    #[must_use]
    pub const fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Moves the item to another list.
    #[must_use]
    pub const fn with_list(mut self, list_id: ListId) -> Self {
        self.list_id = Some(list_id);
        self
    }

    fn into_changes(self) -> TodoServiceResult<ItemChanges> {
        let mut changes = ItemChanges::default();
        if let Some(content) = self.content {
            changes = changes.with_content(ItemContent::new(content)?);
        }
        if let Some(completed) = self.completed {
            changes = changes.with_completed(completed);
        }
        if let Some(collapsed) = self.collapsed {
            changes = changes.with_collapsed(collapsed);
        }
        if let Some(list_id) = self.list_id {
            changes = changes.with_list(list_id);
        }
        Ok(changes)
    }
}

/// Item orchestration service.
///
/// An item belongs to whoever owns its list; every operation checks that
/// before touching the item store.
#[derive(Clone)]
pub struct TodoItemService<I, L, C>
where
    I: TodoItemRepository,
    L: TodoListRepository,
    C: Clock + Send + Sync,
{
    items: Arc<I>,
    lists: Arc<L>,
    clock: Arc<C>,
}

impl<I, L, C> TodoItemService<I, L, C>
where
    I: TodoItemRepository,
    L: TodoListRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new item service.
    #[must_use]
    pub const fn new(items: Arc<I>, lists: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            items,
            lists,
            clock,
        }
    }

    /// Creates an item in one of the caller's lists.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Domain`] for invalid content, ownership
    /// errors for the list, and store errors for a missing parent, a parent
    /// at the deepest level, or a parent in another list.
    pub async fn create_item(
        &self,
        current_user: UserId,
        request: CreateItemRequest,
    ) -> TodoServiceResult<TodoItem> {
        owned_list(&*self.lists, current_user, request.list_id).await?;
        let content = ItemContent::new(request.content)?;

        let draft = ItemDraft::new(content, request.list_id, request.parent_id, &*self.clock);
        let item = self.items.create(draft).await?;
        info!(
            item_id = %item.id(),
            list_id = %item.list_id(),
            level = %item.level(),
            "item created"
        );
        Ok(item)
    }

    /// Returns one of the caller's items.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::ItemNotFound`] or
    /// [`TodoServiceError::Forbidden`].
    pub async fn get_item(
        &self,
        current_user: UserId,
        item_id: ItemId,
    ) -> TodoServiceResult<TodoItem> {
        owned_item(&*self.items, &*self.lists, current_user, item_id).await
    }

    /// Returns the direct children of one of the caller's items.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::get_item`] or a store error.
    pub async fn children(
        &self,
        current_user: UserId,
        item_id: ItemId,
    ) -> TodoServiceResult<Vec<TodoItem>> {
        owned_item(&*self.items, &*self.lists, current_user, item_id).await?;
        Ok(self.items.find_children(item_id).await?)
    }

    /// Returns the top-level items of one of the caller's lists.
    ///
    /// # Errors
    ///
    /// Returns list ownership errors or a store error.
    pub async fn roots(
        &self,
        current_user: UserId,
        list_id: ListId,
    ) -> TodoServiceResult<Vec<TodoItem>> {
        owned_list(&*self.lists, current_user, list_id).await?;
        Ok(self.items.find_roots(list_id).await?)
    }

    /// Applies a partial update to one of the caller's items.
    ///
    /// # Errors
    ///
    /// Returns ownership errors for the item and for a target list,
    /// [`TodoServiceError::Domain`] for invalid content, and store errors
    /// when completing over unfinished children or moving a nested item.
    pub async fn update_item(
        &self,
        current_user: UserId,
        item_id: ItemId,
        request: UpdateItemRequest,
    ) -> TodoServiceResult<TodoItem> {
        owned_item(&*self.items, &*self.lists, current_user, item_id).await?;
        let changes = request.into_changes()?;
        if let Some(target) = changes.list_id {
            owned_list(&*self.lists, current_user, target).await?;
        }

        let item = self.items.update(item_id, changes).await?;
        info!(item_id = %item_id, list_id = %item.list_id(), "item updated");
        Ok(item)
    }

    /// Deletes one of the caller's items and its descendants.
    ///
    /// Returns the number of items removed.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::get_item`] or a store error.
    pub async fn delete_item(
        &self,
        current_user: UserId,
        item_id: ItemId,
    ) -> TodoServiceResult<usize> {
        owned_item(&*self.items, &*self.lists, current_user, item_id).await?;
        let removed = self.items.delete_subtree(item_id).await?;
        info!(item_id = %item_id, removed, "item subtree deleted");
        Ok(removed)
    }

    /// Completes one of the caller's items.
    ///
    /// Top-level items are removed with their subtree; nested items are
    /// marked completed.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::get_item`], and a store error carrying
    /// the number of unfinished children when any direct child is incomplete.
    pub async fn complete_item(
        &self,
        current_user: UserId,
        item_id: ItemId,
    ) -> TodoServiceResult<CompletionOutcome> {
        owned_item(&*self.items, &*self.lists, current_user, item_id).await?;
        let outcome = self.items.complete(item_id).await?;
        info!(
            item_id = %item_id,
            deleted = outcome.deleted,
            "item completed"
        );
        Ok(outcome)
    }

    /// Renders all items of one of the caller's lists as nested trees.
    ///
    /// # Errors
    ///
    /// Returns list ownership errors or a store error.
    pub async fn list_tree(
        &self,
        current_user: UserId,
        list_id: ListId,
    ) -> TodoServiceResult<Vec<ItemNode>> {
        owned_list(&*self.lists, current_user, list_id).await?;
        let items = self.items.find_by_list(list_id).await?;
        debug!(list_id = %list_id, count = items.len(), "list tree loaded");
        Ok(build_forest(items))
    }

    /// Renders one of the caller's items with its descendants.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::get_item`] or a store error.
    pub async fn item_tree(
        &self,
        current_user: UserId,
        item_id: ItemId,
    ) -> TodoServiceResult<ItemNode> {
        owned_item(&*self.items, &*self.lists, current_user, item_id).await?;
        let subtree = self.items.find_subtree(item_id).await?;
        build_subtree(item_id, subtree).ok_or(TodoServiceError::ItemNotFound(item_id))
    }
}
