//! Service-level errors for list and item operations.

use crate::account::domain::UserId;
use crate::error::ErrorKind;
use crate::todo::{
    domain::{ItemId, ListId, TodoDomainError},
    ports::TodoStoreError,
};
use thiserror::Error;

/// Service-level errors for to-do operations.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// Input validation or a hierarchy rule failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TodoStoreError),
    /// No list exists with the given identifier.
    #[error("list {0} not found")]
    ListNotFound(ListId),
    /// No item exists with the given identifier.
    #[error("item {0} not found")]
    ItemNotFound(ItemId),
    /// The caller does not own the list.
    #[error("user {user_id} does not own list {list_id}")]
    Forbidden {
        /// Requesting user.
        user_id: UserId,
        /// List the user tried to access.
        list_id: ListId,
    },
}

impl TodoServiceError {
    /// Classifies the error for the routing layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) | Self::Store(TodoStoreError::Rule(err)) => domain_kind(err),
            Self::ListNotFound(_)
            | Self::ItemNotFound(_)
            | Self::Store(
                TodoStoreError::ListNotFound(_)
                | TodoStoreError::ItemNotFound(_)
                | TodoStoreError::ParentNotFound(_),
            ) => ErrorKind::NotFound,
            Self::Forbidden { .. } => ErrorKind::Authorization,
            Self::Store(
                TodoStoreError::DuplicateList(_)
                | TodoStoreError::DuplicateItem(_)
                | TodoStoreError::InvalidPersistedData(_)
                | TodoStoreError::Persistence(_),
            ) => ErrorKind::Internal,
        }
    }

    /// Returns the number of unfinished children for completion failures.
    #[must_use]
    pub const fn incomplete_children(&self) -> Option<usize> {
        match self {
            Self::Domain(TodoDomainError::IncompleteChildren { count, .. })
            | Self::Store(TodoStoreError::Rule(TodoDomainError::IncompleteChildren {
                count, ..
            })) => Some(*count),
            _ => None,
        }
    }
}

const fn domain_kind(err: &TodoDomainError) -> ErrorKind {
    match err {
        TodoDomainError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
        TodoDomainError::IncompleteChildren { .. } => ErrorKind::IncompleteChildren,
        TodoDomainError::InconsistentHierarchy { .. } => ErrorKind::Internal,
        TodoDomainError::EmptyListTitle
        | TodoDomainError::ListTitleTooLong { .. }
        | TodoDomainError::EmptyItemContent
        | TodoDomainError::ItemContentTooLong { .. }
        | TodoDomainError::InvalidLevel(_)
        | TodoDomainError::ParentInDifferentList { .. }
        | TodoDomainError::NestedItemMove(_) => ErrorKind::Validation,
    }
}

/// Result type for to-do service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;
