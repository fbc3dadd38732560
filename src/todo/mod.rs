//! To-do lists and their hierarchical items.
//!
//! A list belongs to one user and holds a forest of items nested at most
//! three levels deep. Completing an item requires its direct children to be
//! complete; completing a top-level item removes it. The module follows
//! hexagonal architecture:
//!
//! - Domain types and rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
