//! Error types for shaper-fs

use std::path::{Path, PathBuf};

/// Result type for shaper-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in shaper-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file sits where a directory has to exist.
    #[error("Not a directory: {path} exists and is not a directory")]
    NotADirectory { path: PathBuf },

    /// A directory sits where a file has to be written.
    #[error("Is a directory: {path} exists and is a directory")]
    IsADirectory { path: PathBuf },

    #[error("Unsafe relative path {path:?}: {reason}")]
    UnsafePath { path: String, reason: &'static str },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors that mean the target tree has a file where a
    /// directory belongs, or the other way around.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::NotADirectory { .. } | Self::IsADirectory { .. })
    }

    /// Filesystem path the error refers to, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. }
            | Self::NotADirectory { path }
            | Self::IsADirectory { path }
            | Self::ConfigParse { path, .. }
            | Self::LockFailed { path } => Some(path.as_path()),
            Self::UnsafePath { .. } | Self::UnsupportedFormat { .. } => None,
        }
    }
}
