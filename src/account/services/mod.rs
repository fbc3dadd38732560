//! Application services for user accounts.

mod registration;

pub use registration::{
    AccountService, AccountServiceError, AccountServiceResult, RegisterUserRequest,
};
