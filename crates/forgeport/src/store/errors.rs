use thiserror::Error;

/// Errors from the local record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database error (including natural-key constraint
    /// violations surfaced by the import's bulk writes).
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A write was attempted with a missing required field.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl StoreError {
    /// Create an invalid input error.
    #[inline]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
