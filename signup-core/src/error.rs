//! Error types for the activity signup service.

use thiserror::Error;

/// Errors that can occur in store and config operations.
#[derive(Error, Debug)]
pub enum SignupError {
    #[error("Activity not found")]
    ActivityNotFound(String),

    #[error("Student is already signed up")]
    AlreadySignedUp { activity: String, email: String },

    #[error("Student is not signed up for this activity")]
    NotSignedUp { activity: String, email: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SignupError {
    /// True for errors caused by the request rather than the store itself.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            SignupError::AlreadySignedUp { .. } | SignupError::NotSignedUp { .. }
        )
    }
}

/// Result type alias for signup operations.
pub type SignupResult<T> = Result<T, SignupError>;
