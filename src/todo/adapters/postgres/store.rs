//! `PostgreSQL` store implementing the list and item ports.

use super::{
    models::{ItemRow, ListRow, NewListRow},
    schema::{todo_items, todo_lists},
    sql_helpers::{
        delete_items, insert_item, list_exists, load_children, load_item, lock_item, move_items,
        row_to_item, row_to_list, subtree_ids, write_item,
    },
};
use crate::account::domain::UserId;
use crate::todo::{
    domain::{
        CompletionAction, CompletionOutcome, ItemChanges, ItemDraft, ItemId, ListId, ListTitle,
        TodoItem, TodoList, plan_completion,
    },
    ports::{TodoItemRepository, TodoListRepository, TodoStoreError, TodoStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by to-do adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed list and item store.
///
/// All database work runs on the blocking thread pool. Multi-step mutations
/// run inside one transaction and lock the affected item row first, so
/// concurrent completions of the same item serialise.
#[derive(Debug, Clone)]
pub struct PostgresTodoStore {
    pool: TodoPgPool,
}

impl PostgresTodoStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, operation: F) -> TodoStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoStoreError::persistence)?;
            operation(&mut connection)
        })
        .await
        .map_err(TodoStoreError::persistence)?
    }

    async fn run_transaction<F, T>(&self, operation: F) -> TodoStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TodoStoreError, _>(operation)
        })
        .await
    }
}

#[async_trait]
impl TodoListRepository for PostgresTodoStore {
    async fn store(&self, list: &TodoList) -> TodoStoreResult<()> {
        let list_id = list.id();
        let new_row = NewListRow {
            id: list_id.into_inner(),
            title: list.title().as_str().to_owned(),
            user_id: list.owner_id().into_inner(),
            created_at: list.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(todo_lists::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TodoStoreError::DuplicateList(list_id)
                    }
                    other => TodoStoreError::from(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ListId) -> TodoStoreResult<Option<TodoList>> {
        self.run_blocking(move |connection| {
            todo_lists::table
                .filter(todo_lists::id.eq(id.into_inner()))
                .select(ListRow::as_select())
                .first::<ListRow>(connection)
                .optional()?
                .map(row_to_list)
                .transpose()
        })
        .await
    }

    async fn list_by_owner(&self, owner_id: UserId) -> TodoStoreResult<Vec<TodoList>> {
        self.run_blocking(move |connection| {
            let rows = todo_lists::table
                .filter(todo_lists::user_id.eq(owner_id.into_inner()))
                .order(todo_lists::position.asc())
                .select(ListRow::as_select())
                .load::<ListRow>(connection)?;
            rows.into_iter().map(row_to_list).collect()
        })
        .await
    }

    async fn update_title(&self, id: ListId, title: &ListTitle) -> TodoStoreResult<TodoList> {
        let new_title = title.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::update(todo_lists::table.filter(todo_lists::id.eq(id.into_inner())))
                .set(todo_lists::title.eq(&new_title))
                .returning(ListRow::as_returning())
                .get_result::<ListRow>(connection)
                .optional()?
                .map(row_to_list)
                .transpose()?
                .ok_or(TodoStoreError::ListNotFound(id))
        })
        .await
    }

    async fn delete_with_items(&self, id: ListId) -> TodoStoreResult<usize> {
        self.run_transaction(move |connection| {
            let list_uuid = id.into_inner();
            if !list_exists(connection, id)? {
                return Err(TodoStoreError::ListNotFound(id));
            }
            let removed = diesel::delete(todo_items::table.filter(todo_items::list_id.eq(list_uuid)))
                .execute(connection)?;
            diesel::delete(todo_lists::table.filter(todo_lists::id.eq(list_uuid)))
                .execute(connection)?;
            Ok(removed)
        })
        .await
    }
}

#[async_trait]
impl TodoItemRepository for PostgresTodoStore {
    async fn create(&self, draft: ItemDraft) -> TodoStoreResult<TodoItem> {
        self.run_transaction(move |connection| {
            if !list_exists(connection, draft.list_id())? {
                return Err(TodoStoreError::ListNotFound(draft.list_id()));
            }
            let parent = match draft.parent_id() {
                Some(parent_id) => Some(
                    load_item(connection, parent_id)?
                        .ok_or(TodoStoreError::ParentNotFound(parent_id))?,
                ),
                None => None,
            };
            let item = TodoItem::create(draft, parent.as_ref())?;
            insert_item(connection, &item)?;
            Ok(item)
        })
        .await
    }

    async fn find_by_id(&self, id: ItemId) -> TodoStoreResult<Option<TodoItem>> {
        self.run_blocking(move |connection| load_item(connection, id))
            .await
    }

    async fn find_children(&self, id: ItemId) -> TodoStoreResult<Vec<TodoItem>> {
        self.run_blocking(move |connection| load_children(connection, id))
            .await
    }

    async fn find_roots(&self, list_id: ListId) -> TodoStoreResult<Vec<TodoItem>> {
        self.run_blocking(move |connection| {
            let rows = todo_items::table
                .filter(todo_items::list_id.eq(list_id.into_inner()))
                .filter(todo_items::parent_id.is_null())
                .order(todo_items::position.asc())
                .select(ItemRow::as_select())
                .load::<ItemRow>(connection)?;
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }

    async fn find_by_list(&self, list_id: ListId) -> TodoStoreResult<Vec<TodoItem>> {
        self.run_blocking(move |connection| {
            let rows = todo_items::table
                .filter(todo_items::list_id.eq(list_id.into_inner()))
                .order(todo_items::position.asc())
                .select(ItemRow::as_select())
                .load::<ItemRow>(connection)?;
            rows.into_iter().map(row_to_item).collect()
        })
        .await
    }

    async fn find_subtree(&self, id: ItemId) -> TodoStoreResult<Vec<TodoItem>> {
        self.run_transaction(move |connection| {
            let ids = subtree_ids(connection, id)?;
            let rows = todo_items::table
                .filter(todo_items::id.eq_any(&ids))
                .select(ItemRow::as_select())
                .load::<ItemRow>(connection)?;
            let mut items = rows
                .into_iter()
                .map(row_to_item)
                .collect::<TodoStoreResult<Vec<_>>>()?;
            items.sort_by_key(|item| {
                ids.iter()
                    .position(|candidate| *candidate == item.id().into_inner())
            });
            Ok(items)
        })
        .await
    }

    async fn update(&self, id: ItemId, changes: ItemChanges) -> TodoStoreResult<TodoItem> {
        self.run_transaction(move |connection| {
            let mut item = lock_item(connection, id)?;
            if let Some(target) = changes.list_id
                && !list_exists(connection, target)?
            {
                return Err(TodoStoreError::ListNotFound(target));
            }
            let children = load_children(connection, id)?;
            let relocation = item.apply_changes(changes, &children)?;
            write_item(connection, &item)?;
            if let Some(target) = relocation {
                let ids = subtree_ids(connection, id)?;
                move_items(connection, &ids, target)?;
            }
            Ok(item)
        })
        .await
    }

    async fn delete_subtree(&self, id: ItemId) -> TodoStoreResult<usize> {
        self.run_transaction(move |connection| {
            lock_item(connection, id)?;
            let ids = subtree_ids(connection, id)?;
            delete_items(connection, &ids)
        })
        .await
    }

    async fn complete(&self, id: ItemId) -> TodoStoreResult<CompletionOutcome> {
        self.run_transaction(move |connection| {
            let mut item = lock_item(connection, id)?;
            let children = load_children(connection, id)?;
            let action = plan_completion(&item, &children)?;
            match action {
                CompletionAction::RemoveSubtree => {
                    let ids = subtree_ids(connection, id)?;
                    delete_items(connection, &ids)?;
                }
                CompletionAction::MarkCompleted => {
                    item.mark_completed();
                    write_item(connection, &item)?;
                }
            }
            Ok(CompletionOutcome::from(action))
        })
        .await
    }
}
