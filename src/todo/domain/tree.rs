//! Nested rendering of item hierarchies.

use super::{ItemContent, ItemId, ItemLevel, TodoItem};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// An item with its descendants nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemNode {
    /// Item identifier.
    pub id: ItemId,
    /// Item text.
    pub content: ItemContent,
    /// Completion flag.
    pub completed: bool,
    /// UI collapse flag.
    pub collapsed: bool,
    /// Nesting level.
    pub level: ItemLevel,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Direct children in insertion order.
    pub children: Vec<ItemNode>,
}

type ChildIndex = HashMap<ItemId, Vec<TodoItem>>;

/// Builds the forest of a whole list.
///
/// `items` must be in insertion order; roots and every child sequence keep
/// that order. Items whose parent is absent from `items` are dropped.
#[must_use]
pub fn build_forest(items: Vec<TodoItem>) -> Vec<ItemNode> {
    let mut roots = Vec::new();
    let mut index = ChildIndex::new();
    for item in items {
        match item.parent_id() {
            None => roots.push(item),
            Some(parent_id) => index.entry(parent_id).or_default().push(item),
        }
    }
    roots.iter().map(|root| assemble(root, &mut index)).collect()
}

/// Builds the subtree rooted at `root_id`.
///
/// Returns `None` when `root_id` is not among `items`.
#[must_use]
pub fn build_subtree(root_id: ItemId, items: Vec<TodoItem>) -> Option<ItemNode> {
    let mut root = None;
    let mut index = ChildIndex::new();
    for item in items {
        if item.id() == root_id {
            root = Some(item);
        } else if let Some(parent_id) = item.parent_id() {
            index.entry(parent_id).or_default().push(item);
        }
    }
    root.map(|item| assemble(&item, &mut index))
}

// Recursion depth is bounded by `ItemLevel::MAX`.
fn assemble(item: &TodoItem, index: &mut ChildIndex) -> ItemNode {
    let children = index
        .remove(&item.id())
        .unwrap_or_default()
        .iter()
        .map(|child| assemble(child, index))
        .collect();
    ItemNode {
        id: item.id(),
        content: item.content().clone(),
        completed: item.is_completed(),
        collapsed: item.is_collapsed(),
        level: item.level(),
        created_at: item.created_at(),
        children,
    }
}
