//! In-memory list and item store for tests and embedded use.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::account::domain::UserId;
use crate::todo::{
    domain::{
        CompletionAction, CompletionOutcome, ItemChanges, ItemDraft, ItemId, ListId, ListTitle,
        TodoItem, TodoList, plan_completion,
    },
    ports::{TodoItemRepository, TodoListRepository, TodoStoreError, TodoStoreResult},
};

/// Thread-safe in-memory store implementing both list and item ports.
///
/// Lists and items share one lock, so every operation, cascades included,
/// observes and leaves a consistent tree. Validation completes before any
/// mutation, so a rejected operation leaves the state untouched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    state: Arc<RwLock<InMemoryTodoState>>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    lists: HashMap<ListId, TodoList>,
    list_order: Vec<ListId>,
    items: HashMap<ItemId, TodoItem>,
    item_order: Vec<ItemId>,
    children: HashMap<ItemId, Vec<ItemId>>,
}

impl InMemoryTodoStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TodoStoreResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state
            .read()
            .map_err(|err| TodoStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TodoStoreResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state
            .write()
            .map_err(|err| TodoStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

impl InMemoryTodoState {
    fn items_where(&self, predicate: impl Fn(&TodoItem) -> bool) -> Vec<TodoItem> {
        self.item_order
            .iter()
            .filter_map(|id| self.items.get(id))
            .filter(|&item| predicate(item))
            .cloned()
            .collect()
    }

    fn children_of(&self, id: ItemId) -> Vec<TodoItem> {
        self.children
            .get(&id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|child_id| self.items.get(child_id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns `root` followed by its descendants, breadth first.
    fn subtree_ids(&self, root: ItemId) -> Vec<ItemId> {
        let mut collected = Vec::new();
        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            collected.push(id);
            if let Some(child_ids) = self.children.get(&id) {
                queue.extend(child_ids.iter().copied());
            }
        }
        collected
    }

    fn remove_items(&mut self, ids: &[ItemId]) {
        let removed: HashSet<ItemId> = ids.iter().copied().collect();
        for id in ids {
            if let Some(item) = self.items.remove(id)
                && let Some(siblings) = item
                    .parent_id()
                    .and_then(|parent_id| self.children.get_mut(&parent_id))
            {
                siblings.retain(|sibling| sibling != id);
            }
            self.children.remove(id);
        }
        self.item_order.retain(|id| !removed.contains(id));
    }
}

#[async_trait]
impl TodoListRepository for InMemoryTodoStore {
    async fn store(&self, list: &TodoList) -> TodoStoreResult<()> {
        let mut state = self.write()?;
        if state.lists.contains_key(&list.id()) {
            return Err(TodoStoreError::DuplicateList(list.id()));
        }
        state.lists.insert(list.id(), list.clone());
        state.list_order.push(list.id());
        Ok(())
    }

    async fn find_by_id(&self, id: ListId) -> TodoStoreResult<Option<TodoList>> {
        let state = self.read()?;
        Ok(state.lists.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> TodoStoreResult<Vec<TodoList>> {
        let state = self.read()?;
        Ok(state
            .list_order
            .iter()
            .filter_map(|id| state.lists.get(id))
            .filter(|list| list.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn update_title(&self, id: ListId, title: &ListTitle) -> TodoStoreResult<TodoList> {
        let mut state = self.write()?;
        let list = state
            .lists
            .get_mut(&id)
            .ok_or(TodoStoreError::ListNotFound(id))?;
        list.rename(title.clone());
        Ok(list.clone())
    }

    async fn delete_with_items(&self, id: ListId) -> TodoStoreResult<usize> {
        let mut state = self.write()?;
        if !state.lists.contains_key(&id) {
            return Err(TodoStoreError::ListNotFound(id));
        }
        let item_ids: Vec<ItemId> = state
            .items_where(|item| item.list_id() == id)
            .iter()
            .map(TodoItem::id)
            .collect();
        state.remove_items(&item_ids);
        state.lists.remove(&id);
        state.list_order.retain(|list_id| *list_id != id);
        Ok(item_ids.len())
    }
}

#[async_trait]
impl TodoItemRepository for InMemoryTodoStore {
    async fn create(&self, draft: ItemDraft) -> TodoStoreResult<TodoItem> {
        let mut state = self.write()?;
        if !state.lists.contains_key(&draft.list_id()) {
            return Err(TodoStoreError::ListNotFound(draft.list_id()));
        }
        if state.items.contains_key(&draft.id()) {
            return Err(TodoStoreError::DuplicateItem(draft.id()));
        }
        let parent = draft
            .parent_id()
            .map(|parent_id| {
                state
                    .items
                    .get(&parent_id)
                    .cloned()
                    .ok_or(TodoStoreError::ParentNotFound(parent_id))
            })
            .transpose()?;

        let item = TodoItem::create(draft, parent.as_ref())?;
        state.items.insert(item.id(), item.clone());
        state.item_order.push(item.id());
        if let Some(parent_id) = item.parent_id() {
            state.children.entry(parent_id).or_default().push(item.id());
        }
        Ok(item)
    }

    async fn find_by_id(&self, id: ItemId) -> TodoStoreResult<Option<TodoItem>> {
        let state = self.read()?;
        Ok(state.items.get(&id).cloned())
    }

    async fn find_children(&self, id: ItemId) -> TodoStoreResult<Vec<TodoItem>> {
        let state = self.read()?;
        Ok(state.children_of(id))
    }

    async fn find_roots(&self, list_id: ListId) -> TodoStoreResult<Vec<TodoItem>> {
        let state = self.read()?;
        Ok(state.items_where(|item| item.list_id() == list_id && item.parent_id().is_none()))
    }

    async fn find_by_list(&self, list_id: ListId) -> TodoStoreResult<Vec<TodoItem>> {
        let state = self.read()?;
        Ok(state.items_where(|item| item.list_id() == list_id))
    }

    async fn find_subtree(&self, id: ItemId) -> TodoStoreResult<Vec<TodoItem>> {
        let state = self.read()?;
        if !state.items.contains_key(&id) {
            return Ok(Vec::new());
        }
        Ok(state
            .subtree_ids(id)
            .iter()
            .filter_map(|item_id| state.items.get(item_id).cloned())
            .collect())
    }

    async fn update(&self, id: ItemId, changes: ItemChanges) -> TodoStoreResult<TodoItem> {
        let mut state = self.write()?;
        let mut item = state
            .items
            .get(&id)
            .cloned()
            .ok_or(TodoStoreError::ItemNotFound(id))?;
        if let Some(target) = changes.list_id
            && !state.lists.contains_key(&target)
        {
            return Err(TodoStoreError::ListNotFound(target));
        }

        let children = state.children_of(id);
        let relocation = item.apply_changes(changes, &children)?;
        if let Some(target) = relocation {
            for descendant_id in state.subtree_ids(id).into_iter().skip(1) {
                if let Some(descendant) = state.items.get_mut(&descendant_id) {
                    descendant.follow_to_list(target);
                }
            }
        }
        state.items.insert(id, item.clone());
        Ok(item)
    }

    async fn delete_subtree(&self, id: ItemId) -> TodoStoreResult<usize> {
        let mut state = self.write()?;
        if !state.items.contains_key(&id) {
            return Err(TodoStoreError::ItemNotFound(id));
        }
        let ids = state.subtree_ids(id);
        state.remove_items(&ids);
        Ok(ids.len())
    }

    async fn complete(&self, id: ItemId) -> TodoStoreResult<CompletionOutcome> {
        let mut state = self.write()?;
        let item = state
            .items
            .get(&id)
            .ok_or(TodoStoreError::ItemNotFound(id))?;
        let action = plan_completion(item, &state.children_of(id))?;

        match action {
            CompletionAction::RemoveSubtree => {
                let ids = state.subtree_ids(id);
                state.remove_items(&ids);
            }
            CompletionAction::MarkCompleted => {
                if let Some(stored) = state.items.get_mut(&id) {
                    stored.mark_completed();
                }
            }
        }
        Ok(CompletionOutcome::from(action))
    }
}
