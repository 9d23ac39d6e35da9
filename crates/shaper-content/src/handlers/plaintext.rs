//! Plain text codec

use serde_json::Value;

use super::scalar_text;
use crate::error::{Error, Result};
use crate::format::{Format, FormatCodec};

/// Identity codec: the file content is the value.
#[derive(Debug, Default)]
pub struct PlainTextCodec;

impl PlainTextCodec {
    pub fn new() -> Self {
        Self
    }
}

impl FormatCodec for PlainTextCodec {
    fn format(&self) -> Format {
        Format::PlainText
    }

    fn decode(&self, source: &str) -> Result<Value> {
        Ok(Value::String(source.to_string()))
    }

    fn encode(&self, value: &Value) -> Result<String> {
        scalar_text(value).ok_or_else(|| {
            Error::serialize(
                Format::PlainText,
                "only scalar values can be written to a text file",
            )
        })
    }
}
