//! Application services for to-do lists and items.

mod access;
pub mod error;
pub mod items;
pub mod lists;

pub use error::{TodoServiceError, TodoServiceResult};
pub use items::{CreateItemRequest, TodoItemService, UpdateItemRequest};
pub use lists::TodoListService;
