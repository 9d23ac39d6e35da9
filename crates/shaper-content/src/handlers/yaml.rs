//! YAML codec using serde_yaml

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sort_value;
use crate::error::{Error, Result};
use crate::format::{Format, FormatCodec};

/// Serializer settings for YAML, passed to the codec instead of being
/// registered globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YamlOptions {
    /// Keep mapping keys in document order. When off, keys are sorted.
    pub preserve_order: bool,
    /// Emit strings containing newlines as literal blocks (`|`). When off the
    /// document is emitted in JSON-compatible flow style and such strings
    /// are double-quoted.
    pub literal_block_for_multiline: bool,
}

impl Default for YamlOptions {
    fn default() -> Self {
        Self {
            preserve_order: true,
            literal_block_for_multiline: true,
        }
    }
}

/// Codec for YAML files
#[derive(Debug, Default)]
pub struct YamlCodec {
    options: YamlOptions,
}

impl YamlCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: YamlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> YamlOptions {
        self.options
    }

    fn ordered<'a>(&self, value: &'a Value) -> Cow<'a, Value> {
        if self.options.preserve_order {
            Cow::Borrowed(value)
        } else {
            Cow::Owned(sort_value(value))
        }
    }
}

impl FormatCodec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn decode(&self, source: &str) -> Result<Value> {
        if source.trim().is_empty() {
            return Ok(Value::Null);
        }
        let value: Value =
            serde_yaml::from_str(source).map_err(|e| Error::parse(Format::Yaml, e.to_string()))?;
        Ok(self.ordered(&value).into_owned())
    }

    fn encode(&self, value: &Value) -> Result<String> {
        let value = self.ordered(value);
        if self.options.literal_block_for_multiline {
            // serde_yaml picks the literal block style for any string with a newline
            serde_yaml::to_string(value.as_ref())
                .map_err(|e| Error::serialize(Format::Yaml, e.to_string()))
        } else {
            let mut out = serde_json::to_string_pretty(value.as_ref())
                .map_err(|e| Error::serialize(Format::Yaml, e.to_string()))?;
            out.push('\n');
            Ok(out)
        }
    }
}
