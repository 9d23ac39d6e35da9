//! Format detection and codec trait

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
    Xml,
    Properties,
    PlainText,
}

impl Format {
    /// Every supported format.
    pub const ALL: [Format; 5] = [
        Self::Json,
        Self::Yaml,
        Self::Xml,
        Self::Properties,
        Self::PlainText,
    ];

    /// Detect format from a file extension (without the dot).
    ///
    /// The empty extension is not handled here; whether extension-less files
    /// are plain text is a registry setting.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "xml" => Some(Self::Xml),
            "properties" => Some(Self::Properties),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// File extensions mapped to this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yml", "yaml"],
            Self::Xml => &["xml"],
            Self::Properties => &["properties"],
            Self::PlainText => &["txt"],
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Xml => "XML",
            Self::Properties => "properties",
            Self::PlainText => "plain text",
        };
        f.write_str(name)
    }
}

/// Read/write pair for one file format.
///
/// `decode` turns file content into a value (mapping, sequence or scalar);
/// `encode` is its inverse. Neither touches the filesystem.
pub trait FormatCodec: Send + Sync {
    /// Format identifier
    fn format(&self) -> Format;

    /// Parse file content
    fn decode(&self, source: &str) -> Result<Value>;

    /// Render a value as file content
    fn encode(&self, value: &Value) -> Result<String>;
}
