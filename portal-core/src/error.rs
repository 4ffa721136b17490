//! Error types for the portal client.

use thiserror::Error;

use crate::session::Role;

/// Errors that can occur in portal operations.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not logged in. Run `portal login` first")]
    NotLoggedIn,

    #[error("This action requires the {required} role (logged in as {actual})")]
    Forbidden { required: Role, actual: Role },

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for portal operations.
pub type PortalResult<T> = Result<T, PortalError>;
