//! Validated credential values: username, e-mail, password and its hash.

use super::AccountDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum username length, matching `VARCHAR(80)`.
const MAX_USERNAME_LENGTH: usize = 80;

/// Maximum e-mail length, matching `VARCHAR(120)`.
const MAX_EMAIL_LENGTH: usize = 120;

/// Unique login name of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Creates a validated username. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyUsername`] or
    /// [`AccountDomainError::UsernameTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AccountDomainError::EmptyUsername);
        }
        let length = trimmed.chars().count();
        if length > MAX_USERNAME_LENGTH {
            return Err(AccountDomainError::UsernameTooLong {
                length,
                max: MAX_USERNAME_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<String> for Username {
    type Error = AccountDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Unique e-mail address of a user, stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated e-mail address.
    ///
    /// The value is trimmed and lowercased and must contain exactly one `@`
    /// with non-empty text on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError`] when validation fails.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let normalized = value.into().trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(AccountDomainError::EmptyEmail);
        }

        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && parts.next().is_none()
            && !normalized.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(AccountDomainError::InvalidEmail(normalized));
        }

        let length = normalized.chars().count();
        if length > MAX_EMAIL_LENGTH {
            return Err(AccountDomainError::EmailTooLong {
                length,
                max: MAX_EMAIL_LENGTH,
            });
        }
        Ok(Self(normalized))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Plain-text password supplied at registration or login.
///
/// Never serialized and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wraps a non-empty password. Whitespace is significant and kept.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyPassword`] for an empty value.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(AccountDomainError::EmptyPassword);
        }
        Ok(Self(raw))
    }

    /// Exposes the secret to a hashing implementation.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Password(<redacted>)")
    }
}

/// Opaque password hash produced by a [`crate::account::ports::PasswordHasher`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an encoded hash.
    ///
    /// # Errors
    ///
    /// Returns [`AccountDomainError::EmptyPasswordHash`] for an empty value.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountDomainError> {
        let encoded = value.into();
        if encoded.is_empty() {
            return Err(AccountDomainError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }

    /// Returns the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PasswordHash(<redacted>)")
    }
}
