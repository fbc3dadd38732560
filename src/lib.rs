//! Tasktree: a hierarchical to-do list backend.
//!
//! Users register, create lists and organise tasks inside them as trees up
//! to three levels deep. A task can only be completed once all of its direct
//! subtasks are; completing a top-level task removes it with its subtree.
//!
//! # Architecture
//!
//! Tasktree follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and hashing
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Ownership-checked orchestration used by the request layer
//!
//! HTTP routing and session handling live outside the crate. They resolve
//! the caller, call the services and map failures through
//! [`error::ErrorKind`].
//!
//! # Modules
//!
//! - [`account`]: Registration, authentication and user lookup
//! - [`todo`]: Lists, item hierarchies, completion and tree rendering
//! - [`app`]: Composition root wiring stores into services
//! - [`config`]: Database configuration from JSON and the environment
//! - [`error`]: Failure classification for the request boundary
//! - [`worker`]: Shell quoting shared by the `pg_worker` binary

pub mod account;
pub mod app;
pub mod config;
pub mod error;
pub mod todo;
pub mod worker;
