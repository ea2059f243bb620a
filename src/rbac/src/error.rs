//! Error types for the RBAC engine
//!
//! Decision functions never fail: malformed identity data always resolves to
//! a deny. These errors only surface from the typed helpers (parsing, role
//! change planning, configuration loading).

use crate::registry::Role;
use thiserror::Error;

/// RBAC engine errors
#[derive(Debug, Error)]
pub enum RbacError {
    /// Role tag is not one of the known roles
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Permission tag is not one of the known permissions
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// Record carries no recognized role
    #[error("User record has no recognized role")]
    MissingRole,

    /// Admin can only be granted out of band
    #[error("Cannot elevate {from} to admin through a role change")]
    AdminElevation {
        /// Role the user currently holds
        from: Role,
    },

    /// Admins can only be demoted out of band
    #[error("Cannot change admin to {to} through a role change")]
    AdminDemotion {
        /// Requested role
        to: Role,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for RBAC operations
pub type Result<T> = std::result::Result<T, RbacError>;
