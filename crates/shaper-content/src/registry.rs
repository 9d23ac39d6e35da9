//! Extension-to-codec dispatch

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shaper_fs::{NormalizedPath, io};

use crate::error::{Error, Result};
use crate::format::{Format, FormatCodec};
use crate::handlers::{JsonCodec, PlainTextCodec, PropertiesCodec, XmlCodec, YamlCodec, YamlOptions};

/// Registry settings, the `[registry]` and `[yaml]` tables of `shaper.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Read and write files without an extension as plain text.
    pub default_text_codec: bool,
    #[serde(skip)]
    pub yaml: YamlOptions,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_text_codec: true,
            yaml: YamlOptions::default(),
        }
    }
}

/// Fixed table of codecs, resolved by file extension.
///
/// Both [`read`](Self::read) and [`write`](Self::write) log a warning on
/// failure and hand the error back, so a caller walking many files can record
/// it and move on.
#[derive(Debug)]
pub struct FormatRegistry {
    config: RegistryConfig,
    json: JsonCodec,
    yaml: YamlCodec,
    xml: XmlCodec,
    properties: PropertiesCodec,
    text: PlainTextCodec,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            json: JsonCodec,
            yaml: YamlCodec::with_options(config.yaml),
            xml: XmlCodec,
            properties: PropertiesCodec,
            text: PlainTextCodec,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Resolve the format of `path` from the text after the last `.` of its
    /// file name.
    pub fn format_for(&self, path: &Path) -> Result<Format> {
        let normalized = NormalizedPath::new(path);
        match normalized.extension() {
            Some(ext) => Format::from_extension(ext).ok_or_else(|| Error::UnsupportedExtension {
                extension: ext.to_string(),
            }),
            None if self.config.default_text_codec => Ok(Format::PlainText),
            None => Err(Error::UnsupportedExtension {
                extension: String::new(),
            }),
        }
    }

    /// Whether `path` has an extension this registry handles.
    pub fn recognizes(&self, path: &Path) -> bool {
        self.format_for(path).is_ok()
    }

    pub fn codec(&self, format: Format) -> &dyn FormatCodec {
        match format {
            Format::Json => &self.json,
            Format::Yaml => &self.yaml,
            Format::Xml => &self.xml,
            Format::Properties => &self.properties,
            Format::PlainText => &self.text,
        }
    }

    /// Read and decode the file at `path`.
    pub fn read(&self, path: &Path) -> Result<Value> {
        let result = self.try_read(path);
        match &result {
            Ok(_) => tracing::debug!(path = %path.display(), "read file"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to read file"),
        }
        result
    }

    /// Encode `value` and write it to `path`, creating parent directories.
    pub fn write(&self, value: &Value, path: &Path) -> Result<()> {
        let result = self.try_write(value, path);
        match &result {
            Ok(()) => tracing::debug!(path = %path.display(), "wrote file"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to write file"),
        }
        result
    }

    fn try_read(&self, path: &Path) -> Result<Value> {
        let format = self.format_for(path).map_err(|e| e.at(path))?;
        let content = io::read_text(&NormalizedPath::new(path))?;
        self.codec(format).decode(&content).map_err(|e| e.at(path))
    }

    fn try_write(&self, value: &Value, path: &Path) -> Result<()> {
        let format = self.format_for(path).map_err(|e| e.at(path))?;
        let content = self.codec(format).encode(value).map_err(|e| e.at(path))?;
        io::write_text(&NormalizedPath::new(path), &content)?;
        Ok(())
    }
}
