//! Diesel row models for list and item persistence.
//!
//! The `position` columns are assigned by the database and only used for
//! ordering, so no model reads or writes them.

use super::schema::{todo_items, todo_lists};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for list records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todo_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// List title.
    pub title: String,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for list records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todo_lists)]
pub struct NewListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// List title.
    pub title: String,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for item records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todo_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    /// Item identifier.
    pub id: uuid::Uuid,
    /// Item text.
    pub content: String,
    /// Completion flag.
    pub completed: bool,
    /// UI collapse flag.
    pub collapsed: bool,
    /// Owning list.
    pub list_id: uuid::Uuid,
    /// Parent item, if any.
    pub parent_id: Option<uuid::Uuid>,
    /// Nesting level.
    pub level: i16,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for item records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todo_items)]
pub struct NewItemRow {
    /// Item identifier.
    pub id: uuid::Uuid,
    /// Item text.
    pub content: String,
    /// Completion flag.
    pub completed: bool,
    /// UI collapse flag.
    pub collapsed: bool,
    /// Owning list.
    pub list_id: uuid::Uuid,
    /// Parent item, if any.
    pub parent_id: Option<uuid::Uuid>,
    /// Nesting level.
    pub level: i16,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset written by item updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todo_items)]
pub struct ItemChangeset {
    /// Item text.
    pub content: String,
    /// Completion flag.
    pub completed: bool,
    /// UI collapse flag.
    pub collapsed: bool,
    /// Owning list.
    pub list_id: uuid::Uuid,
}
