//! [`FixtureDir`] builder for directory-based test scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

/// A temporary directory holding a configuration tree.
///
/// # Example
///
/// ```rust,no_run
/// use shaper_test_utils::FixtureDir;
///
/// let fixture = FixtureDir::new()
///     .with_file("svc/app.properties", "port=8080\nhost=localhost")
///     .with_file("svc/db.json", r#"{"url": "postgres://db"}"#);
/// fixture.assert_file_exists("svc/app.properties");
/// ```
pub struct FixtureDir {
    temp_dir: TempDir,
}

impl Default for FixtureDir {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the fixture.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Builder form of [`write`](Self::write).
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }

    /// Create the directory `relative` and its parents.
    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.path(relative)).unwrap();
    }

    /// Read the file at `relative`.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Every regular file below the root, see [`snapshot_dir`].
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        snapshot_dir(self.root())
    }

    /// Sorted relative paths of every regular file below the root.
    pub fn files(&self) -> Vec<String> {
        self.snapshot().into_keys().collect()
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` holds exactly `expected`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or differs from `expected`.
    pub fn assert_file_eq(&self, relative: &str, expected: &str) {
        let actual = self.read(relative);
        assert!(
            actual == expected,
            "File {} differs.\nExpected: {:?}\nActual: {:?}",
            relative,
            expected,
            actual
        );
    }
}

/// Every regular file below `root` as `relative path -> content`, paths
/// `/`-joined and sorted. Unreadable or non-UTF-8 files map to an empty
/// string.
pub fn snapshot_dir(root: &Path) -> BTreeMap<String, String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let content = fs::read_to_string(entry.path()).unwrap_or_default();
            (relative, content)
        })
        .collect()
}
