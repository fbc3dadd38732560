//! Domain model for user accounts.
//!
//! Accounts own to-do lists. The domain validates credentials and keeps the
//! password hash opaque; hashing itself happens behind a port.

mod credentials;
mod error;
mod ids;
mod user;

pub use credentials::{EmailAddress, Password, PasswordHash, Username};
pub use error::AccountDomainError;
pub use ids::UserId;
pub use user::User;
