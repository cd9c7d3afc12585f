use thiserror::Error;

use crate::domain::validation::ValidationErrors;
use crate::user::errors::UserError;

/// Errors raised by login and bearer-token resolution.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Unknown user and wrong password are reported identically.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The reason is for logs only, never for the caller.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal authentication error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
