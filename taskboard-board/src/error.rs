//! Error types for the board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur while reconciling or decoding board state.
///
/// Drop resolution itself never errors; it aborts silently.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Drop event payload could not be decoded
    #[error("invalid drop payload: {message}")]
    InvalidPayload { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a task-not-found error
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::TaskNotFound { id: id.into() }
    }

    /// Create a column-not-found error
    pub fn column_not_found(id: impl Into<String>) -> Self {
        Self::ColumnNotFound { id: id.into() }
    }

    /// Create an invalid payload error
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Whether the error means the local snapshot is stale and should be refetched
    pub fn is_stale_state(&self) -> bool {
        matches!(self, Self::TaskNotFound { .. } | Self::ColumnNotFound { .. })
    }
}
