//! Normalized path handling for path keys
//!
//! Path keys are the `/`-joined relative paths that identify a file both in
//! the flat map and in the nested tree. They never use the platform
//! separator; conversion happens only at I/O boundaries.

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Backslashes become forward slashes and runs of slashes collapse to one,
/// except for a leading `//` which marks a network path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment_normalized
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Iterate over the `/`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|s| !s.is_empty())
    }

    /// Express `path` relative to `base`, or `None` when it is not below it.
    pub fn relative_to(path: &Path, base: &Path) -> Option<Self> {
        let relative = path.strip_prefix(base).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(Self {
            inner: segments.join("/"),
        })
    }

    /// Get the extension if present.
    ///
    /// A leading dot (`.env`) does not start an extension.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }
}

fn clean(path: &str) -> String {
    let (prefix, rest) = if path.starts_with("//") && !path.starts_with("///") {
        ("//", &path[2..])
    } else {
        ("", path)
    };

    let mut out = String::with_capacity(path.len());
    out.push_str(prefix);
    let mut previous_slash = false;
    for ch in rest.chars() {
        if ch == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(ch);
    }
    out
}

/// Validate a flattened key before it is joined onto an output directory.
///
/// Rejects absolute keys and keys with empty, `.` or `..` segments so that
/// nothing can be written outside the output root.
pub fn validate_relative(key: &str) -> Result<NormalizedPath> {
    let unsafe_path = |reason| Error::UnsafePath {
        path: key.to_string(),
        reason,
    };

    if key.is_empty() {
        return Err(unsafe_path("empty path"));
    }
    if key.starts_with('/') || key.starts_with('\\') {
        return Err(unsafe_path("absolute path"));
    }
    for component in Path::new(key).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(unsafe_path("absolute path"));
            }
            Component::ParentDir => return Err(unsafe_path("parent directory segment")),
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    for segment in key.split(['/', '\\']) {
        match segment {
            "" => return Err(unsafe_path("empty segment")),
            "." => return Err(unsafe_path("current directory segment")),
            ".." => return Err(unsafe_path("parent directory segment")),
            _ => {}
        }
    }

    Ok(NormalizedPath::new(key))
}

/// Absolute form of `path` for diagnostics; falls back to the input when the
/// path cannot be resolved.
pub fn absolute(path: &Path) -> PathBuf {
    dunce::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslashes_become_slashes() {
        let path = NormalizedPath::new("svc\\conf\\app.properties");
        assert_eq!(path.as_str(), "svc/conf/app.properties");
    }

    #[test]
    fn test_repeated_slashes_collapse() {
        assert_eq!(NormalizedPath::new("a//b///c").as_str(), "a/b/c");
        assert_eq!(NormalizedPath::new("//server/share").as_str(), "//server/share");
    }

    #[test]
    fn test_extension_ignores_leading_dot() {
        assert_eq!(NormalizedPath::new("a/.env").extension(), None);
        assert_eq!(NormalizedPath::new("a/app.yml").extension(), Some("yml"));
        assert_eq!(NormalizedPath::new("a/Dockerfile").extension(), None);
    }

    #[test]
    fn test_relative_to() {
        let rel = NormalizedPath::relative_to(Path::new("/srv/cfg/svc/a.json"), Path::new("/srv/cfg"));
        assert_eq!(rel.unwrap().as_str(), "svc/a.json");
        assert!(NormalizedPath::relative_to(Path::new("/other/a.json"), Path::new("/srv")).is_none());
    }

    #[test]
    fn test_validate_relative_rejects_escapes() {
        assert!(validate_relative("svc/app.properties").is_ok());
        assert!(validate_relative("../etc/passwd").is_err());
        assert!(validate_relative("/etc/passwd").is_err());
        assert!(validate_relative("a//b.txt").is_err());
        assert!(validate_relative("a/./b.txt").is_err());
        assert!(validate_relative("").is_err());
    }
}
