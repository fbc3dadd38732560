//! Ownership checks shared by the list and item services.

use super::{TodoServiceError, TodoServiceResult};
use crate::account::domain::UserId;
use crate::todo::{
    domain::{ItemId, ListId, TodoItem, TodoList},
    ports::{TodoItemRepository, TodoListRepository},
};
use tracing::warn;

/// Loads a list and verifies that `user_id` owns it.
pub(super) async fn owned_list<L>(
    lists: &L,
    user_id: UserId,
    list_id: ListId,
) -> TodoServiceResult<TodoList>
where
    L: TodoListRepository + ?Sized,
{
    let list = lists
        .find_by_id(list_id)
        .await?
        .ok_or(TodoServiceError::ListNotFound(list_id))?;
    if !list.is_owned_by(user_id) {
        warn!(user_id = %user_id, list_id = %list_id, "list access denied");
        return Err(TodoServiceError::Forbidden { user_id, list_id });
    }
    Ok(list)
}

/// Loads an item and verifies that `user_id` owns its list.
pub(super) async fn owned_item<I, L>(
    items: &I,
    lists: &L,
    user_id: UserId,
    item_id: ItemId,
) -> TodoServiceResult<TodoItem>
where
    I: TodoItemRepository + ?Sized,
    L: TodoListRepository + ?Sized,
{
    let item = items
        .find_by_id(item_id)
        .await?
        .ok_or(TodoServiceError::ItemNotFound(item_id))?;
    owned_list(lists, user_id, item.list_id()).await?;
    Ok(item)
}
