//! To-do list aggregate and its validated title.

use super::{ListId, TodoDomainError};
use crate::account::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum list title length, matching `VARCHAR(100)`.
const MAX_TITLE_LENGTH: usize = 100;

/// Non-empty list title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListTitle(String);

impl ListTitle {
    /// Creates a validated title. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyListTitle`] or
    /// [`TodoDomainError::ListTitleTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyListTitle);
        }
        let length = trimmed.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(TodoDomainError::ListTitleTooLong {
                length,
                max: MAX_TITLE_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListTitle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<String> for ListTitle {
    type Error = TodoDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ListTitle> for String {
    fn from(value: ListTitle) -> Self {
        value.0
    }
}

/// Named container of items, owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    id: ListId,
    title: ListTitle,
    owner_id: UserId,
    created_at: DateTime<Utc>,
}

impl TodoList {
    /// Creates a new list for `owner_id`.
    #[must_use]
    pub fn new(title: ListTitle, owner_id: UserId, clock: &impl Clock) -> Self {
        Self {
            id: ListId::new(),
            title,
            owner_id,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a list from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ListId,
        title: ListTitle,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            owner_id,
            created_at,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &ListTitle {
        &self.title
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when `user_id` owns this list.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: ListTitle) {
        self.title = title;
    }
}
