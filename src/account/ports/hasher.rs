//! Password hashing port.
//!
//! The account services only produce and check opaque hashes.
//! [`crate::account::adapters::hasher::Argon2PasswordHasher`] is the bundled
//! implementation; callers may supply their own.

use crate::account::domain::{Password, PasswordHash};
use thiserror::Error;

/// Password hashing contract.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produces a hash suitable for storage.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError`] when the hasher cannot produce a hash.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// Checks a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError`] when the stored hash cannot be decoded.
    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}

/// Failure reported by a password hasher implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("password hashing failed: {0}")]
pub struct PasswordHasherError(pub String);
