//! Request-boundary error classification shared by all service layers.
//!
//! Service errors are rich `thiserror` enums; the routing layer only needs to
//! know which family a failure belongs to. [`ErrorKind`] is that family and
//! carries the HTTP status the router answers with.

use serde::Serialize;
use std::fmt;

/// Failure family exposed to the routing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad or missing input the caller can correct.
    Validation,
    /// Credentials did not match a registered user.
    Authentication,
    /// The caller does not own the addressed resource.
    Authorization,
    /// The addressed resource does not exist.
    NotFound,
    /// Creating the item would nest deeper than three levels.
    DepthExceeded,
    /// The item still has unfinished direct children.
    IncompleteChildren,
    /// Unexpected persistence or runtime failure.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP status code the routing layer maps this kind to.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Validation | Self::DepthExceeded | Self::IncompleteChildren => 400,
            Self::Authentication => 401,
            Self::Authorization => 403,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }

    /// Returns `true` when the failure is the caller's to fix.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        !matches!(self, Self::Internal)
    }

    /// Returns the canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::DepthExceeded => "depth_exceeded",
            Self::IncompleteChildren => "incomplete_children",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
