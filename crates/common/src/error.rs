//! Error types for fanvault.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Lookup Errors ===
    #[error("Creator not found: {0}")]
    CreatorNotFound(u64),

    #[error("Post not found: {0}")]
    PostNotFound(u64),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(u64),

    #[error("Message not found: {message_id} in conversation {conversation_id}")]
    MessageNotFound {
        /// Conversation that was searched.
        conversation_id: u64,
        /// Message id that was missing.
        message_id: u64,
    },

    // === Input Errors ===
    #[error("Validation error: {0}")]
    Validation(String),

    // === Setup Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    // === Internal Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CreatorNotFound(_) => "CREATOR_NOT_FOUND",
            Self::PostNotFound(_) => "POST_NOT_FOUND",
            Self::ConversationNotFound(_) => "CONVERSATION_NOT_FOUND",
            Self::MessageNotFound { .. } => "MESSAGE_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Fixture(_) => "FIXTURE_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should render as a "not found" placeholder.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CreatorNotFound(_)
                | Self::PostNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::MessageNotFound { .. }
        )
    }

    /// Log this error at a level matching its severity.
    pub fn log(&self) {
        let code = self.error_code();
        if self.is_not_found() || matches!(self, Self::Validation(_)) {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        } else {
            tracing::error!(error = %self, code = code, "Internal error occurred");
        }
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Fixture(err.to_string())
    }
}
