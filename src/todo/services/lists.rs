//! Service layer for list management.

use super::{TodoServiceResult, access::owned_list};
use crate::account::domain::UserId;
use crate::todo::{
    domain::{ListId, ListTitle, TodoList},
    ports::TodoListRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// List orchestration service.
///
/// Every operation takes the authenticated caller and rejects access to
/// lists owned by someone else.
#[derive(Clone)]
pub struct TodoListService<L, C>
where
    L: TodoListRepository,
    C: Clock + Send + Sync,
{
    lists: Arc<L>,
    clock: Arc<C>,
}

impl<L, C> TodoListService<L, C>
where
    L: TodoListRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new list service.
    #[must_use]
    pub const fn new(lists: Arc<L>, clock: Arc<C>) -> Self {
        Self { lists, clock }
    }

    /// Creates a list owned by `current_user`.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::Domain`] for an empty or overlong
    /// title, or a store error when persistence fails.
    pub async fn create_list(
        &self,
        current_user: UserId,
        title: &str,
    ) -> TodoServiceResult<TodoList> {
        let list = TodoList::new(ListTitle::new(title)?, current_user, &*self.clock);
        self.lists.store(&list).await?;
        info!(list_id = %list.id(), owner_id = %current_user, "list created");
        Ok(list)
    }

    /// Returns one of the caller's lists.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::ListNotFound`] or
    /// [`super::TodoServiceError::Forbidden`].
    pub async fn get_list(
        &self,
        current_user: UserId,
        list_id: ListId,
    ) -> TodoServiceResult<TodoList> {
        owned_list(&*self.lists, current_user, list_id).await
    }

    /// Returns the caller's lists in creation order.
    ///
    /// # Errors
    ///
    /// Returns a store error when the lookup fails.
    pub async fn lists_for_owner(&self, current_user: UserId) -> TodoServiceResult<Vec<TodoList>> {
        let lists = self.lists.list_by_owner(current_user).await?;
        debug!(owner_id = %current_user, count = lists.len(), "lists loaded");
        Ok(lists)
    }

    /// Renames one of the caller's lists.
    ///
    /// # Errors
    ///
    /// Returns [`super::TodoServiceError::Domain`] for an invalid title and
    /// the errors of [`Self::get_list`].
    pub async fn rename_list(
        &self,
        current_user: UserId,
        list_id: ListId,
        title: &str,
    ) -> TodoServiceResult<TodoList> {
        owned_list(&*self.lists, current_user, list_id).await?;
        let new_title = ListTitle::new(title)?;
        let list = self.lists.update_title(list_id, &new_title).await?;
        info!(list_id = %list_id, "list renamed");
        Ok(list)
    }

    /// Deletes one of the caller's lists together with all of its items.
    ///
    /// Returns the number of items removed.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::get_list`] or a store error.
    pub async fn delete_list(
        &self,
        current_user: UserId,
        list_id: ListId,
    ) -> TodoServiceResult<usize> {
        owned_list(&*self.lists, current_user, list_id).await?;
        let removed = self.lists.delete_with_items(list_id).await?;
        info!(list_id = %list_id, removed_items = removed, "list deleted");
        Ok(removed)
    }
}
