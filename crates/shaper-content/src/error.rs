//! Error types for shaper-content

use std::fmt;
use std::path::{Path, PathBuf};

use crate::format::Format;

/// Result type for shaper-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing a single file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    Parse { format: Format, message: String },

    #[error("Cannot write value as {format}: {message}")]
    Serialize { format: Format, message: String },

    #[error("Unsupported file extension {extension:?}")]
    UnsupportedExtension { extension: String },

    /// A codec error tied to the file it happened in.
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Fs(#[from] shaper_fs::Error),
}

impl Error {
    pub fn parse(format: Format, message: impl Into<String>) -> Self {
        Self::Parse {
            format,
            message: message.into(),
        }
    }

    pub fn serialize(format: Format, message: impl Into<String>) -> Self {
        Self::Serialize {
            format,
            message: message.into(),
        }
    }

    /// Attach the absolute path of the file this error belongs to.
    pub fn at(self, path: &Path) -> Self {
        match self {
            Self::File { .. } | Self::Fs(_) => self,
            other => Self::File {
                path: shaper_fs::absolute(path),
                source: Box::new(other),
            },
        }
    }

    /// Classify the error for reporting.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Parse { .. } => FailureKind::Parse,
            Self::Serialize { .. } => FailureKind::Serialize,
            Self::UnsupportedExtension { .. } => FailureKind::UnsupportedExtension,
            Self::File { source, .. } => source.kind(),
            Self::Fs(e) if e.is_conflict() => FailureKind::Conflict,
            Self::Fs(_) => FailureKind::Io,
        }
    }
}

/// Coarse classification of per-file failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    UnsupportedExtension,
    Parse,
    Serialize,
    Io,
    /// File/directory clash in the target tree. Fatal for a write batch.
    Conflict,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnsupportedExtension => "unsupported extension",
            Self::Parse => "parse failure",
            Self::Serialize => "serialize failure",
            Self::Io => "I/O failure",
            Self::Conflict => "structural conflict",
        };
        f.write_str(name)
    }
}
