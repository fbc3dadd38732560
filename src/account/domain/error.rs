//! Error types for account domain validation.

use thiserror::Error;

/// Errors returned while constructing account domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the storage limit.
    #[error("username exceeds {max} characters: {length}")]
    UsernameTooLong {
        /// Observed length in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The e-mail address is empty after trimming.
    #[error("email must not be empty")]
    EmptyEmail,

    /// The e-mail address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The e-mail address exceeds the storage limit.
    #[error("email exceeds {max} characters: {length}")]
    EmailTooLong {
        /// Observed length in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The stored password hash is empty.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}
