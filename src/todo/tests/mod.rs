//! Unit tests for the to-do module.


use crate::todo::domain::{ItemContent, ItemDraft, ListId, TodoItem};
use mockable::DefaultClock;

/// Builds a top-level item in `list_id`.
fn root_item(list_id: ListId, content: &str) -> TodoItem {
    let draft = ItemDraft::new(
        ItemContent::new(content).expect("valid content"),
        list_id,
        None,
        &DefaultClock,
    );
    TodoItem::create(draft, None).expect("root item")
}

/// Builds an item nested under `parent`.
fn child_item(parent: &TodoItem, content: &str) -> TodoItem {
    let draft = ItemDraft::new(
        ItemContent::new(content).expect("valid content"),
        parent.list_id(),
        Some(parent.id()),
        &DefaultClock,
    );
    TodoItem::create(draft, Some(parent)).expect("child item")
}

/// Returns `item` in the completed state.
fn completed(mut item: TodoItem) -> TodoItem {
    item.mark_completed();
    item
}
