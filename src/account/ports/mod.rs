//! Port contracts for user accounts.

pub mod hasher;
pub mod repository;

pub use hasher::{PasswordHasher, PasswordHasherError};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};

#[cfg(test)]
pub use hasher::MockPasswordHasher;
