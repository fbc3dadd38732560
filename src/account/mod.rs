//! User accounts: registration, credential checks and lookup.
//!
//! Accounts are the owners of to-do lists. Session handling lives outside
//! the crate; it resolves a [`domain::UserId`] through
//! [`services::AccountService::find_user`] and passes it to the to-do
//! services. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
