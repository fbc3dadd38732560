//! User aggregate.

use super::{EmailAddress, PasswordHash, UserId, Username};
use serde::{Serialize, Serializer, ser::SerializeStruct};

/// Registered user.
///
/// Users are created at registration and never mutated afterwards. The
/// password hash is excluded from serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
}

impl User {
    /// Creates a new user with a fresh identifier.
    #[must_use]
    pub fn register(username: Username, email: EmailAddress, password_hash: PasswordHash) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: UserId,
        username: Username,
        email: EmailAddress,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the e-mail address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

impl Serialize for User {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("User", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("email", &self.email)?;
        state.end()
    }
}
