//! To-do item aggregate and the values that constrain its hierarchy.

use super::{ItemId, ListId, TodoDomainError, completion::ensure_children_complete};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum item content length, matching `VARCHAR(200)`.
const MAX_CONTENT_LENGTH: usize = 200;

/// Non-empty item text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemContent(String);

impl ItemContent {
    /// Creates validated content. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyItemContent`] or
    /// [`TodoDomainError::ItemContentTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyItemContent);
        }
        let length = trimmed.chars().count();
        if length > MAX_CONTENT_LENGTH {
            return Err(TodoDomainError::ItemContentTooLong {
                length,
                max: MAX_CONTENT_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the content as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemContent {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<String> for ItemContent {
    type Error = TodoDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemContent> for String {
    fn from(value: ItemContent) -> Self {
        value.0
    }
}

/// Nesting depth of an item, from 1 (top level) to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemLevel(u8);

impl ItemLevel {
    /// Level of items without a parent.
    pub const ROOT: Self = Self(1);

    /// Deepest level an item may reach.
    pub const MAX: Self = Self(3);

    /// Creates a level, rejecting values outside `1..=3`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidLevel`] for out-of-range values.
    pub fn new(value: u8) -> Result<Self, TodoDomainError> {
        if (Self::ROOT.0..=Self::MAX.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TodoDomainError::InvalidLevel(i64::from(value)))
        }
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` for top-level items.
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == Self::ROOT.0
    }

    /// Returns the level of a child nested under this level, if one is
    /// allowed.
    #[must_use]
    pub const fn child(self) -> Option<Self> {
        if self.0 < Self::MAX.0 {
            Some(Self(self.0 + 1))
        } else {
            None
        }
    }
}

impl TryFrom<i16> for ItemLevel {
    type Error = TodoDomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| TodoDomainError::InvalidLevel(i64::from(value)))
            .and_then(Self::new)
    }
}

impl From<ItemLevel> for i16 {
    fn from(level: ItemLevel) -> Self {
        Self::from(level.0)
    }
}

impl fmt::Display for ItemLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated request to create an item, before its parent is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    id: ItemId,
    content: ItemContent,
    list_id: ListId,
    parent_id: Option<ItemId>,
    created_at: DateTime<Utc>,
}

impl ItemDraft {
    /// Creates a draft stamped with the current clock time.
    #[must_use]
    pub fn new(
        content: ItemContent,
        list_id: ListId,
        parent_id: Option<ItemId>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ItemId::new(),
            content,
            list_id,
            parent_id,
            created_at: clock.utc(),
        }
    }

    /// Returns the identifier the created item will carry.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the requested content.
    #[must_use]
    pub const fn content(&self) -> &ItemContent {
        &self.content
    }

    /// Returns the target list.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the requested parent, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<ItemId> {
        self.parent_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Partial update of an item's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    /// Replacement content.
    pub content: Option<ItemContent>,
    /// New completion flag.
    pub completed: Option<bool>,
    /// New collapse flag.
    pub collapsed: Option<bool>,
    /// Target list for a move.
    pub list_id: Option<ListId>,
}

impl ItemChanges {
    /// Sets the replacement content.
    #[must_use]
    pub fn with_content(mut self, content: ItemContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the collapse flag.
    #[must_use]
    pub const fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Moves the item to another list.
    #[must_use]
    pub const fn with_list(mut self, list_id: ListId) -> Self {
        self.list_id = Some(list_id);
        self
    }

    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.completed.is_none()
            && self.collapsed.is_none()
            && self.list_id.is_none()
    }
}

/// Node in a list's item tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoItem {
    id: ItemId,
    content: ItemContent,
    completed: bool,
    collapsed: bool,
    list_id: ListId,
    parent_id: Option<ItemId>,
    level: ItemLevel,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedItemData {
    /// Persisted item identifier.
    pub id: ItemId,
    /// Persisted content.
    pub content: ItemContent,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted collapse flag.
    pub collapsed: bool,
    /// Owning list.
    pub list_id: ListId,
    /// Parent item, if any.
    pub parent_id: Option<ItemId>,
    /// Persisted nesting level.
    pub level: ItemLevel,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates an item from a draft.
    ///
    /// `parent` must be the item referenced by [`ItemDraft::parent_id`], as
    /// resolved by the caller. The level is derived from it.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::DepthExceeded`] when the parent is already
    /// at the deepest level and [`TodoDomainError::ParentInDifferentList`]
    /// when the parent lives in another list.
    pub fn create(draft: ItemDraft, parent: Option<&Self>) -> Result<Self, TodoDomainError> {
        let level = match parent {
            None => ItemLevel::ROOT,
            Some(parent_item) => {
                if parent_item.list_id != draft.list_id {
                    return Err(TodoDomainError::ParentInDifferentList {
                        parent_id: parent_item.id,
                        parent_list: parent_item.list_id,
                        requested_list: draft.list_id,
                    });
                }
                parent_item
                    .level
                    .child()
                    .ok_or(TodoDomainError::DepthExceeded {
                        parent_id: parent_item.id,
                        parent_level: parent_item.level.value(),
                    })?
            }
        };

        Ok(Self {
            id: draft.id,
            content: draft.content,
            completed: false,
            collapsed: false,
            list_id: draft.list_id,
            parent_id: parent.map(Self::id),
            level,
            created_at: draft.created_at,
        })
    }

    /// Reconstructs an item from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InconsistentHierarchy`] when the stored
    /// level disagrees with the presence of a parent link.
    pub fn from_persisted(data: PersistedItemData) -> Result<Self, TodoDomainError> {
        if data.level.is_root() == data.parent_id.is_some() {
            return Err(TodoDomainError::InconsistentHierarchy {
                item_id: data.id,
                level: data.level.value(),
                has_parent: data.parent_id.is_some(),
            });
        }
        Ok(Self {
            id: data.id,
            content: data.content,
            completed: data.completed,
            collapsed: data.collapsed,
            list_id: data.list_id,
            parent_id: data.parent_id,
            level: data.level,
            created_at: data.created_at,
        })
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the content.
    #[must_use]
    pub const fn content(&self) -> &ItemContent {
        &self.content
    }

    /// Returns `true` once the item is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the UI collapse flag.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Returns the owning list.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the parent item, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<ItemId> {
        self.parent_id
    }

    /// Returns the nesting level.
    #[must_use]
    pub const fn level(&self) -> ItemLevel {
        self.level
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies a partial update.
    ///
    /// `children` are the item's current direct children; they are consulted
    /// only when the update sets `completed = true`. Nothing is modified when
    /// an error is returned. On success the target list is returned when the
    /// item moved, so the caller can move its descendants along with it.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::IncompleteChildren`] when completing an
    /// item with unfinished children and [`TodoDomainError::NestedItemMove`]
    /// when a nested item is moved to another list.
    pub fn apply_changes(
        &mut self,
        changes: ItemChanges,
        children: &[Self],
    ) -> Result<Option<ListId>, TodoDomainError> {
        let relocation = changes.list_id.filter(|target| *target != self.list_id);
        if relocation.is_some() && !self.level.is_root() {
            return Err(TodoDomainError::NestedItemMove(self.id));
        }
        if changes.completed == Some(true) {
            ensure_children_complete(self, children)?;
        }

        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        if let Some(collapsed) = changes.collapsed {
            self.collapsed = collapsed;
        }
        if let Some(target) = relocation {
            self.list_id = target;
        }
        Ok(relocation)
    }

    /// Marks the item completed. Callers decide through
    /// [`super::plan_completion`] first.
    pub(crate) const fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Follows an ancestor that moved to another list.
    pub(crate) const fn follow_to_list(&mut self, list_id: ListId) {
        self.list_id = list_id;
    }
}
