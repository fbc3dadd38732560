//! Completion rules for to-do items.
//!
//! An item can be completed only when every direct child is already
//! complete. Completing a top-level item removes it together with its
//! subtree; nested items stay in place marked as completed. Grandchildren
//! are never inspected directly: a child can only be complete if its own
//! children were, so the rule holds transitively.

use super::{TodoDomainError, TodoItem};
use serde::Serialize;

/// What the store must do to complete an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionAction {
    /// Delete the item and its subtree.
    RemoveSubtree,
    /// Set `completed = true` and keep the item.
    MarkCompleted,
}

/// Result reported to callers after a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionOutcome {
    /// The item reached the completed state.
    pub completed: bool,
    /// The item was removed from storage.
    pub deleted: bool,
}

impl From<CompletionAction> for CompletionOutcome {
    fn from(action: CompletionAction) -> Self {
        Self {
            completed: true,
            deleted: matches!(action, CompletionAction::RemoveSubtree),
        }
    }
}

/// Counts the incomplete direct children of `item` among `candidates`.
///
/// Candidates that are not direct children are ignored, so a whole subtree
/// may be passed in.
#[must_use]
pub fn incomplete_children(item: &TodoItem, candidates: &[TodoItem]) -> usize {
    candidates
        .iter()
        .filter(|candidate| candidate.parent_id() == Some(item.id()))
        .filter(|candidate| !candidate.is_completed())
        .count()
}

/// Fails when any direct child of `item` is incomplete.
///
/// # Errors
///
/// Returns [`TodoDomainError::IncompleteChildren`] with the number of
/// unfinished children.
pub fn ensure_children_complete(
    item: &TodoItem,
    candidates: &[TodoItem],
) -> Result<(), TodoDomainError> {
    match incomplete_children(item, candidates) {
        0 => Ok(()),
        count => Err(TodoDomainError::IncompleteChildren {
            item_id: item.id(),
            count,
        }),
    }
}

/// Decides how to complete `item` given its direct children.
///
/// # Errors
///
/// Returns [`TodoDomainError::IncompleteChildren`] when any direct child is
/// unfinished.
pub fn plan_completion(
    item: &TodoItem,
    children: &[TodoItem],
) -> Result<CompletionAction, TodoDomainError> {
    ensure_children_complete(item, children)?;
    if item.level().is_root() {
        Ok(CompletionAction::RemoveSubtree)
    } else {
        Ok(CompletionAction::MarkCompleted)
    }
}
