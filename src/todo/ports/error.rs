//! Errors shared by the list and item store ports.

use crate::todo::domain::{ItemId, ListId, TodoDomainError};
use std::sync::Arc;
use thiserror::Error;

/// Result type for to-do store operations.
pub type TodoStoreResult<T> = Result<T, TodoStoreError>;

/// Errors returned by list and item store implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoStoreError {
    /// The list was not found.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// The item was not found.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The referenced parent item was not found.
    #[error("parent item not found: {0}")]
    ParentNotFound(ItemId),

    /// A list with the same identifier already exists.
    #[error("duplicate list identifier: {0}")]
    DuplicateList(ListId),

    /// An item with the same identifier already exists.
    #[error("duplicate item identifier: {0}")]
    DuplicateItem(ItemId),

    /// A hierarchy rule rejected the operation.
    #[error(transparent)]
    Rule(#[from] TodoDomainError),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted to-do data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoStoreError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
