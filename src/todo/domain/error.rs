//! Error types for to-do domain validation and hierarchy rules.

use super::{ItemId, ListId};
use thiserror::Error;

/// Errors returned while constructing or changing to-do domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The list title is empty after trimming.
    #[error("list title must not be empty")]
    EmptyListTitle,

    /// The list title exceeds the storage limit.
    #[error("list title exceeds {max} characters: {length}")]
    ListTitleTooLong {
        /// Observed length in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The item content is empty after trimming.
    #[error("item content must not be empty")]
    EmptyItemContent,

    /// The item content exceeds the storage limit.
    #[error("item content exceeds {max} characters: {length}")]
    ItemContentTooLong {
        /// Observed length in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// A nesting level outside `1..=3` was supplied.
    #[error("invalid item level {0}, expected 1 to 3")]
    InvalidLevel(i64),

    /// Nesting under the parent would exceed the maximum depth.
    #[error("maximum nesting level reached: parent {parent_id} is at level {parent_level}")]
    DepthExceeded {
        /// Parent that cannot take more nested children.
        parent_id: ItemId,
        /// Level of that parent.
        parent_level: u8,
    },

    /// A child must live in the same list as its parent.
    #[error("parent {parent_id} belongs to list {parent_list}, not {requested_list}")]
    ParentInDifferentList {
        /// Requested parent.
        parent_id: ItemId,
        /// List that owns the parent.
        parent_list: ListId,
        /// List the child was requested in.
        requested_list: ListId,
    },

    /// Completion requires every direct child to be complete.
    #[error("cannot complete item {item_id}: {count} subtask(s) are not finished")]
    IncompleteChildren {
        /// Item whose completion was requested.
        item_id: ItemId,
        /// Number of direct children still incomplete.
        count: usize,
    },

    /// Only top-level items can move between lists.
    #[error("item {0} is nested and cannot move to another list on its own")]
    NestedItemMove(ItemId),

    /// Persisted parent link and level disagree.
    #[error("item {item_id} has level {level} but parent link present = {has_parent}")]
    InconsistentHierarchy {
        /// Item with inconsistent data.
        item_id: ItemId,
        /// Stored level.
        level: u8,
        /// Whether a parent identifier is stored.
        has_parent: bool,
    },
}
