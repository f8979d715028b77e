//! Session errors.

use thiserror::Error;

/// Session error type.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Login form failed validation.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Token missing or empty.
    #[error("token invalid or missing")]
    InvalidToken,

    /// No signed-in session.
    #[error("not signed in")]
    NotAuthenticated,

    /// Token storage failed.
    #[error("token storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SessionError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidCredentials(_)
                | SessionError::InvalidToken
                | SessionError::NotAuthenticated
        )
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Storage(e.to_string())
    }
}
