//! Argon2id implementation of the password hashing port.
//!
//! Hashes are stored in PHC string format (`$argon2id$v=19$...`), so the
//! salt and cost parameters travel with each hash.

use crate::account::{
    domain::{Password, PasswordHash},
    ports::{PasswordHasher, PasswordHasherError},
};
use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier as _, SaltString,
    rand_core::OsRng,
};

/// Argon2id hasher with the crate's default cost parameters.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(hashing_failed)?
            .to_string();
        PasswordHash::new(encoded).map_err(|err| PasswordHasherError(err.to_string()))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        let parsed = PhcString::new(hash.as_str()).map_err(hashing_failed)?;
        match self
            .argon2
            .verify_password(password.expose().as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(hashing_failed(err)),
        }
    }
}

fn hashing_failed(err: password_hash::Error) -> PasswordHasherError {
    PasswordHasherError(err.to_string())
}
