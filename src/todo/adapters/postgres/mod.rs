//! `PostgreSQL` adapters for list and item persistence.

mod models;
mod schema;
mod sql_helpers;
mod store;

pub use store::{PostgresTodoStore, TodoPgPool};
