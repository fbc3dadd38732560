//! Query helpers shared by the list and item store.
//!
//! Each helper runs on a connection that the caller may already have opened a
//! transaction on.

use super::{
    models::{ItemChangeset, ItemRow, ListRow, NewItemRow},
    schema::{todo_items, todo_lists},
};
use crate::account::domain::UserId;
use crate::todo::{
    domain::{
        ItemContent, ItemId, ItemLevel, ListId, ListTitle, PersistedItemData, TodoItem, TodoList,
    },
    ports::{TodoStoreError, TodoStoreResult},
};
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

pub(super) fn list_exists(connection: &mut PgConnection, id: ListId) -> TodoStoreResult<bool> {
    Ok(diesel::select(exists(
        todo_lists::table.filter(todo_lists::id.eq(id.into_inner())),
    ))
    .get_result::<bool>(connection)?)
}

pub(super) fn load_item(
    connection: &mut PgConnection,
    id: ItemId,
) -> TodoStoreResult<Option<TodoItem>> {
    todo_items::table
        .filter(todo_items::id.eq(id.into_inner()))
        .select(ItemRow::as_select())
        .first::<ItemRow>(connection)
        .optional()?
        .map(row_to_item)
        .transpose()
}

/// Loads an item and locks its row until the transaction ends.
pub(super) fn lock_item(connection: &mut PgConnection, id: ItemId) -> TodoStoreResult<TodoItem> {
    todo_items::table
        .filter(todo_items::id.eq(id.into_inner()))
        .select(ItemRow::as_select())
        .for_update()
        .first::<ItemRow>(connection)
        .optional()?
        .map(row_to_item)
        .transpose()?
        .ok_or(TodoStoreError::ItemNotFound(id))
}

pub(super) fn load_children(
    connection: &mut PgConnection,
    id: ItemId,
) -> TodoStoreResult<Vec<TodoItem>> {
    let rows = todo_items::table
        .filter(todo_items::parent_id.eq(id.into_inner()))
        .order(todo_items::position.asc())
        .select(ItemRow::as_select())
        .load::<ItemRow>(connection)?;
    rows.into_iter().map(row_to_item).collect()
}

/// Returns `root` followed by its descendants, level by level.
///
/// Depth is bounded by [`ItemLevel::MAX`], so this issues at most that many
/// child queries.
pub(super) fn subtree_ids(connection: &mut PgConnection, root: ItemId) -> TodoStoreResult<Vec<Uuid>> {
    let mut collected = vec![root.into_inner()];
    let mut frontier = collected.clone();
    while !frontier.is_empty() {
        let next: Vec<Uuid> = todo_items::table
            .filter(todo_items::parent_id.eq_any(&frontier))
            .order(todo_items::position.asc())
            .select(todo_items::id)
            .load(connection)?;
        collected.extend(next.iter().copied());
        frontier = next;
    }
    Ok(collected)
}

pub(super) fn insert_item(connection: &mut PgConnection, item: &TodoItem) -> TodoStoreResult<()> {
    let row = NewItemRow {
        id: item.id().into_inner(),
        content: item.content().as_str().to_owned(),
        completed: item.is_completed(),
        collapsed: item.is_collapsed(),
        list_id: item.list_id().into_inner(),
        parent_id: item.parent_id().map(ItemId::into_inner),
        level: i16::from(item.level()),
        created_at: item.created_at(),
    };
    diesel::insert_into(todo_items::table)
        .values(&row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                TodoStoreError::DuplicateItem(item.id())
            }
            other => TodoStoreError::from(other),
        })?;
    Ok(())
}

pub(super) fn write_item(connection: &mut PgConnection, item: &TodoItem) -> TodoStoreResult<()> {
    let changeset = ItemChangeset {
        content: item.content().as_str().to_owned(),
        completed: item.is_completed(),
        collapsed: item.is_collapsed(),
        list_id: item.list_id().into_inner(),
    };
    diesel::update(todo_items::table.filter(todo_items::id.eq(item.id().into_inner())))
        .set(&changeset)
        .execute(connection)?;
    Ok(())
}

pub(super) fn move_items(
    connection: &mut PgConnection,
    ids: &[Uuid],
    target: ListId,
) -> TodoStoreResult<()> {
    diesel::update(todo_items::table.filter(todo_items::id.eq_any(ids)))
        .set(todo_items::list_id.eq(target.into_inner()))
        .execute(connection)?;
    Ok(())
}

pub(super) fn delete_items(connection: &mut PgConnection, ids: &[Uuid]) -> TodoStoreResult<usize> {
    Ok(diesel::delete(todo_items::table.filter(todo_items::id.eq_any(ids))).execute(connection)?)
}

pub(super) fn row_to_list(row: ListRow) -> TodoStoreResult<TodoList> {
    let ListRow {
        id,
        title,
        user_id,
        created_at,
    } = row;
    let parsed_title = ListTitle::new(title).map_err(TodoStoreError::invalid_persisted_data)?;
    Ok(TodoList::from_persisted(
        ListId::from_uuid(id),
        parsed_title,
        UserId::from_uuid(user_id),
        created_at,
    ))
}

pub(super) fn row_to_item(row: ItemRow) -> TodoStoreResult<TodoItem> {
    let ItemRow {
        id,
        content,
        completed,
        collapsed,
        list_id,
        parent_id,
        level,
        created_at,
    } = row;
    let data = PersistedItemData {
        id: ItemId::from_uuid(id),
        content: ItemContent::new(content).map_err(TodoStoreError::invalid_persisted_data)?,
        completed,
        collapsed,
        list_id: ListId::from_uuid(list_id),
        parent_id: parent_id.map(ItemId::from_uuid),
        level: ItemLevel::try_from(level).map_err(TodoStoreError::invalid_persisted_data)?,
        created_at,
    };
    TodoItem::from_persisted(data).map_err(TodoStoreError::invalid_persisted_data)
}

impl From<DieselError> for TodoStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}
