//! Error types for shaper-core

use std::path::PathBuf;

/// Result type for shaper-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a whole run. Per-file problems are reported through
/// [`crate::FileFailure`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output tree has a file where a directory must go, or the other
    /// way around.
    #[error("Structural conflict at {path}: {reason}")]
    Conflict { path: PathBuf, reason: &'static str },

    /// A document that should be a nested tree has a non-mapping root.
    #[error("Document root must be a mapping, found {found}")]
    NotATree { found: &'static str },

    #[error("Invalid playbook {path}: {message}")]
    Playbook { path: PathBuf, message: String },

    #[error("Failed to render template {path}: {message}")]
    Template { path: PathBuf, message: String },

    #[error("Invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: shaper_fs::Error,
    },

    /// Content error from shaper-content
    #[error(transparent)]
    Content(#[from] shaper_content::Error),

    /// Filesystem error from shaper-fs
    #[error(transparent)]
    Fs(#[from] shaper_fs::Error),
}

impl Error {
    /// Turn a file/directory clash reported by the filesystem layer into a
    /// [`Error::Conflict`]. Other errors are passed through unchanged.
    pub(crate) fn from_fs(error: shaper_fs::Error) -> Self {
        match error {
            shaper_fs::Error::NotADirectory { path } => Self::Conflict {
                path,
                reason: "a file exists where a directory is required",
            },
            shaper_fs::Error::IsADirectory { path } => Self::Conflict {
                path,
                reason: "a directory exists where a file must be written",
            },
            other => Self::Fs(other),
        }
    }
}
