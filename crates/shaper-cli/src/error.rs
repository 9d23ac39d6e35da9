//! Error types for shaper-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a CLI run with a non-zero exit status
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from shaper-core
    #[error(transparent)]
    Core(#[from] shaper_core::Error),

    /// Error from shaper-content
    #[error(transparent)]
    Content(#[from] shaper_content::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
