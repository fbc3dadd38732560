//! Port contracts for list and item persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by to-do services.

pub mod error;
pub mod item_repository;
pub mod list_repository;

pub use error::{TodoStoreError, TodoStoreResult};
pub use item_repository::TodoItemRepository;
pub use list_repository::TodoListRepository;
