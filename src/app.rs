//! Composition root.
//!
//! Stores and services are constructed once at start-up and handed to the
//! request layer as a [`TodoApp`]. Nothing in the crate holds global state;
//! every collaborator is passed in explicitly.

use crate::account::{
    adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    ports::{PasswordHasher, UserRepository},
    services::AccountService,
};
use crate::config::DatabaseConfig;
use crate::todo::{
    adapters::{memory::InMemoryTodoStore, postgres::PostgresTodoStore},
    ports::{TodoItemRepository, TodoListRepository},
    services::{TodoItemService, TodoListService},
};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing::info;

/// Connection pool shared by the `PostgreSQL` adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from configuration.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pg_pool(config: &DatabaseConfig) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(config.connect_timeout())
        .build(manager)?;
    info!(
        max_connections = config.max_connections,
        connect_timeout_secs = config.connect_timeout_secs,
        "database pool ready"
    );
    Ok(pool)
}

/// Services wired to one set of stores.
pub struct TodoApp<U, H, L, I, C>
where
    U: UserRepository,
    H: PasswordHasher,
    L: TodoListRepository,
    I: TodoItemRepository,
    C: Clock + Send + Sync,
{
    accounts: AccountService<U, H>,
    lists: TodoListService<L, C>,
    items: TodoItemService<I, L, C>,
}

impl<U, H, L, I, C> TodoApp<U, H, L, I, C>
where
    U: UserRepository,
    H: PasswordHasher,
    L: TodoListRepository,
    I: TodoItemRepository,
    C: Clock + Send + Sync,
{
    /// Wires services to the given stores.
    #[must_use]
    pub fn new(
        users: Arc<U>,
        hasher: Arc<H>,
        lists: Arc<L>,
        items: Arc<I>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            accounts: AccountService::new(users, hasher),
            lists: TodoListService::new(Arc::clone(&lists), Arc::clone(&clock)),
            items: TodoItemService::new(items, lists, clock),
        }
    }

    /// Returns the account service.
    #[must_use]
    pub const fn accounts(&self) -> &AccountService<U, H> {
        &self.accounts
    }

    /// Returns the list service.
    #[must_use]
    pub const fn lists(&self) -> &TodoListService<L, C> {
        &self.lists
    }

    /// Returns the item service.
    #[must_use]
    pub const fn items(&self) -> &TodoItemService<I, L, C> {
        &self.items
    }
}

/// Application backed entirely by in-memory stores.
pub type InMemoryTodoApp<H> =
    TodoApp<InMemoryUserRepository, H, InMemoryTodoStore, InMemoryTodoStore, DefaultClock>;

/// Application backed by `PostgreSQL`.
pub type PostgresTodoApp<H> =
    TodoApp<PostgresUserRepository, H, PostgresTodoStore, PostgresTodoStore, DefaultClock>;

impl<H: PasswordHasher> InMemoryTodoApp<H> {
    /// Wires services to fresh in-memory stores.
    #[must_use]
    pub fn in_memory(hasher: Arc<H>) -> Self {
        let store = Arc::new(InMemoryTodoStore::new());
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            hasher,
            Arc::clone(&store),
            store,
            Arc::new(DefaultClock),
        )
    }
}

impl<H: PasswordHasher> PostgresTodoApp<H> {
    /// Wires services to `PostgreSQL` stores sharing `pool`.
    #[must_use]
    pub fn postgres(pool: &PgPool, hasher: Arc<H>) -> Self {
        let store = Arc::new(PostgresTodoStore::new(pool.clone()));
        Self::new(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            hasher,
            Arc::clone(&store),
            store,
            Arc::new(DefaultClock),
        )
    }
}
