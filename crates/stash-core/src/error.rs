use thiserror::Error;

/// Application-wide error types for Stash.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad credentials, or a missing/invalid/expired token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request input rejected before reaching the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unique constraint hit (e.g. username already taken).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if the failure was caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Unauthorized(_)
                | AppError::Validation(_)
                | AppError::Conflict(_)
                | AppError::SerializationError(_)
        )
    }
}
