//! Directory collection and materialization

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use shaper_content::{FailureKind, FormatRegistry};
use shaper_fs::{NormalizedPath, io, validate_relative, walk_files};

use crate::error::{Error, Result};
use crate::tree::FlatMap;

/// What `collect` does with files that could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Leave the file out of the collected entries.
    #[default]
    Drop,
    /// Keep the file with an `{"error": "..."}` marker as its value.
    Mark,
}

/// Options for [`DirectoryManager::collect`], the `[collect]` table of
/// `shaper.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectOptions {
    pub failures: FailurePolicy,
    /// Keep files whose content decodes to nothing (empty file, `{}`, `[]`).
    pub keep_empty: bool,
}

/// A file that could not be read or written.
#[derive(Debug)]
pub struct FileFailure {
    /// Path key relative to the collected or materialized root.
    pub key: String,
    pub path: PathBuf,
    pub error: shaper_content::Error,
}

impl FileFailure {
    pub fn kind(&self) -> FailureKind {
        self.error.kind()
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.key, self.kind(), self.error)
    }
}

/// Result of collecting a directory.
#[derive(Debug, Default)]
pub struct Collection {
    pub entries: FlatMap,
    /// Files that failed to read. Always reported, whatever the policy.
    pub failures: Vec<FileFailure>,
    /// Keys of files with an extension no codec handles.
    pub skipped: Vec<String>,
}

/// Result of materializing a flat map.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    /// Keys written, in order.
    pub written: Vec<String>,
    pub failures: Vec<FileFailure>,
}

impl MaterializeReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Reads a directory tree into a flat map and writes flat maps back out,
/// one file per key.
#[derive(Debug, Default)]
pub struct DirectoryManager {
    registry: FormatRegistry,
    options: CollectOptions,
}

impl DirectoryManager {
    pub fn new(registry: FormatRegistry) -> Self {
        Self {
            registry,
            options: CollectOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CollectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Read every recognized file below `root`, keyed by its `/`-joined
    /// path relative to `root`.
    ///
    /// Only a missing or non-directory `root` is an error; everything that
    /// goes wrong with a single file ends up in the returned [`Collection`].
    pub fn collect(&self, root: &Path) -> Result<Collection> {
        let walk = walk_files(root)?;
        let mut collection = Collection::default();

        for error in walk.errors {
            let path = error.path().unwrap_or(root).to_path_buf();
            let key = NormalizedPath::relative_to(&path, root)
                .map(|p| p.as_str().to_string())
                .unwrap_or_else(|| path.display().to_string());
            collection.failures.push(FileFailure {
                key,
                path,
                error: error.into(),
            });
        }

        for entry in walk.files {
            let key = entry.relative.as_str().to_string();

            if !self.registry.recognizes(&entry.path) {
                tracing::debug!(key, "skipping file with unsupported extension");
                collection.skipped.push(key);
                continue;
            }

            match self.registry.read(&entry.path) {
                Ok(value) if is_empty(&value) && !self.options.keep_empty => {
                    tracing::debug!(key, "dropping empty file");
                }
                Ok(value) => {
                    collection.entries.insert(key, value);
                }
                Err(error) => {
                    if self.options.failures == FailurePolicy::Mark {
                        collection
                            .entries
                            .insert(key.clone(), json!({ "error": error.to_string() }));
                    }
                    collection.failures.push(FileFailure {
                        key,
                        path: entry.path,
                        error,
                    });
                }
            }
        }

        tracing::info!(
            root = %root.display(),
            files = collection.entries.len(),
            failures = collection.failures.len(),
            skipped = collection.skipped.len(),
            "collected directory"
        );
        Ok(collection)
    }

    /// Write each entry of `flat` to `out_dir/<key>`, creating directories
    /// as needed.
    ///
    /// Unsafe keys and files that fail to encode or write are reported and
    /// skipped. A file/directory clash in the target tree aborts the batch
    /// with [`Error::Conflict`].
    pub fn materialize(&self, flat: &FlatMap, out_dir: &Path) -> Result<MaterializeReport> {
        io::ensure_dir(out_dir).map_err(Error::from_fs)?;

        let mut report = MaterializeReport::default();
        for (key, value) in flat {
            let relative = match validate_relative(key) {
                Ok(relative) => relative,
                Err(e) => {
                    tracing::warn!(key, error = %e, "refusing to write unsafe key");
                    report.failures.push(FileFailure {
                        key: key.clone(),
                        path: out_dir.to_path_buf(),
                        error: e.into(),
                    });
                    continue;
                }
            };

            let target = out_dir.join(relative.to_native());
            if let Some(parent) = target.parent() {
                match io::ensure_dir(parent) {
                    Ok(()) => {}
                    Err(e) if e.is_conflict() => return Err(Error::from_fs(e)),
                    Err(e) => {
                        tracing::warn!(key, error = %e, "failed to create directory");
                        report.failures.push(FileFailure {
                            key: key.clone(),
                            path: target,
                            error: e.into(),
                        });
                        continue;
                    }
                }
            }

            match self.registry.write(value, &target) {
                Ok(()) => report.written.push(key.clone()),
                Err(shaper_content::Error::Fs(e)) if e.is_conflict() => {
                    return Err(Error::from_fs(e));
                }
                Err(error) => report.failures.push(FileFailure {
                    key: key.clone(),
                    path: target,
                    error,
                }),
            }
        }

        tracing::info!(
            out_dir = %out_dir.display(),
            written = report.written.len(),
            failures = report.failures.len(),
            "materialized files"
        );
        Ok(report)
    }
}

/// Null, empty strings and empty containers count as empty content.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!({})));
        assert!(is_empty(&json!([])));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(false)));
        assert!(!is_empty(&json!({"a": null})));
    }

    #[test]
    fn test_collect_options_default() {
        let options = CollectOptions::default();
        assert_eq!(options.failures, FailurePolicy::Drop);
        assert!(!options.keep_empty);
    }
}
