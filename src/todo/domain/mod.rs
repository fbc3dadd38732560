//! Domain model for to-do lists and their item hierarchies.
//!
//! Items form trees at most three levels deep inside a single list. The
//! domain owns every rule about those trees: level derivation, completion
//! preconditions and the nested rendering handed to clients. Stores only
//! fetch and persist.

mod completion;
mod error;
mod ids;
mod item;
mod list;
mod tree;

pub use completion::{
    CompletionAction, CompletionOutcome, ensure_children_complete, incomplete_children,
    plan_completion,
};
pub use error::TodoDomainError;
pub use ids::{ItemId, ListId};
pub use item::{ItemChanges, ItemContent, ItemDraft, ItemLevel, PersistedItemData, TodoItem};
pub use list::{ListTitle, TodoList};
pub use tree::{ItemNode, build_forest, build_subtree};
