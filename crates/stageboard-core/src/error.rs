//! Error types for the board library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{ItemKind, StageId, StageType};

/// Fallback shown to the user when the backend gives no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Comprehensive error type for all board operations.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Item not found for the given ID
    #[error("{kind:?} item with ID {id} not found")]
    ItemNotFound { kind: ItemKind, id: u64 },
    /// Stage not found for the given ID
    #[error("Stage with ID {id} not found")]
    StageNotFound { id: StageId },
    /// Target stage belongs to a different board than the item
    #[error("Stage {stage_id} is a {found:?} stage, expected a {expected:?} stage")]
    StageKindMismatch {
        stage_id: StageId,
        expected: StageType,
        found: StageType,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The backend refused the operation
    #[error("Request rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },
    /// The backend could not be reached
    #[error("Transport error: {message}")]
    Transport { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> BoardError {
        BoardError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BoardError {
        BoardError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl BoardError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Error for a backend that refused the request with an optional reason.
    pub fn rejected(message: Option<impl Into<String>>) -> Self {
        BoardError::Rejected {
            message: message.map(Into::into),
        }
    }

    /// Whether this is a precondition failure detected before any request was
    /// sent. The drag layer ignores these silently.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BoardError::ItemNotFound { .. }
                | BoardError::StageNotFound { .. }
                | BoardError::StageKindMismatch { .. }
                | BoardError::InvalidInput { .. }
        )
    }

    /// Text suitable for a transient user notification.
    ///
    /// A backend rejection carrying a message is surfaced verbatim; rejections
    /// without one and transport failures fall back to
    /// [`GENERIC_FAILURE_MESSAGE`].
    ///
    /// ```rust
    /// use stageboard_core::{error::GENERIC_FAILURE_MESSAGE, BoardError};
    ///
    /// let err = BoardError::rejected(Some("Stage is locked"));
    /// assert_eq!(err.user_message(), "Stage is locked");
    ///
    /// let err = BoardError::rejected(None::<String>);
    /// assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    /// ```
    pub fn user_message(&self) -> String {
        match self {
            BoardError::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            BoardError::Rejected { .. } | BoardError::Transport { .. } => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| BoardError::database(message).with_source(e))
    }
}

/// Maps a `spawn_blocking` join failure into a configuration error.
pub(crate) fn join_error(e: tokio::task::JoinError) -> BoardError {
    BoardError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

/// Result type alias for board operations
pub type Result<T> = std::result::Result<T, BoardError>;
