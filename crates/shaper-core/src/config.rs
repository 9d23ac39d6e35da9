//! Run configuration loaded from `shaper.toml`
//!
//! Every table and key is optional:
//!
//! ```toml
//! [registry]
//! default_text_codec = true
//!
//! [yaml]
//! preserve_order = true
//! literal_block_for_multiline = true
//!
//! [collect]
//! failures = "drop"   # or "mark"
//! keep_empty = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shaper_content::{FormatRegistry, RegistryConfig, YamlOptions};
use shaper_fs::{ConfigStore, NormalizedPath};

use crate::error::{Error, Result};
use crate::manager::{CollectOptions, DirectoryManager};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "shaper.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaperConfig {
    pub registry: RegistryConfig,
    pub yaml: YamlOptions,
    pub collect: CollectOptions,
}

impl ShaperConfig {
    /// Load `path`, failing if it is missing or malformed.
    pub fn load(path: &Path) -> Result<Self> {
        ConfigStore::new()
            .load(&NormalizedPath::new(path))
            .map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Load `shaper.toml` from `dir`, falling back to defaults when there is
    /// none.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path: PathBuf = dir.join(CONFIG_FILE);
        let loaded = ConfigStore::new().load_or_default(&path);
        loaded.map_err(|source| Error::Config { path, source })
    }

    /// Registry settings with the `[yaml]` table folded in.
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            yaml: self.yaml,
            ..self.registry
        }
    }

    /// Directory manager built from this configuration.
    pub fn manager(&self) -> DirectoryManager {
        DirectoryManager::new(FormatRegistry::with_config(self.registry_config()))
            .with_options(self.collect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::FailurePolicy;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ShaperConfig = load_str("[collect]\nfailures = \"mark\"\n");
        assert_eq!(config.collect.failures, FailurePolicy::Mark);
        assert!(!config.collect.keep_empty);
        assert!(config.registry.default_text_codec);
        assert!(config.yaml.preserve_order);
    }

    #[test]
    fn test_registry_config_folds_in_yaml() {
        let mut config = ShaperConfig::default();
        config.yaml.preserve_order = false;
        config.registry.default_text_codec = false;

        let registry = config.registry_config();
        assert!(!registry.yaml.preserve_order);
        assert!(!registry.default_text_codec);
    }

    fn load_str(source: &str) -> ShaperConfig {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, source).unwrap();
        ShaperConfig::load(&path).unwrap()
    }
}
