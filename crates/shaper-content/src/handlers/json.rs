//! JSON codec

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::format::{Format, FormatCodec};

const INDENT: &[u8] = b"    ";

/// Codec for JSON files.
///
/// Output is indented with four spaces and keeps object key order.
#[derive(Debug, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl FormatCodec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn decode(&self, source: &str) -> Result<Value> {
        serde_json::from_str(source).map_err(|e| Error::parse(Format::Json, e.to_string()))
    }

    fn encode(&self, value: &Value) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        value
            .serialize(&mut serializer)
            .map_err(|e| Error::serialize(Format::Json, e.to_string()))?;
        String::from_utf8(buf).map_err(|e| Error::serialize(Format::Json, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_encode_uses_four_spaces() {
        let out = JsonCodec::new().encode(&json!({"a": {"b": 1}})).unwrap();
        assert_eq!(out, "{\n    \"a\": {\n        \"b\": 1\n    }\n}");
    }

    #[test]
    fn test_json_decode_keeps_key_order() {
        let value = JsonCodec::new().decode(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_json_parse_error() {
        let err = JsonCodec::new().decode("{\"unclosed\": ").unwrap_err();
        assert!(matches!(err, Error::Parse { format: Format::Json, .. }));
    }
}
