//! Format codecs

mod json;
mod plaintext;
mod properties;
mod xml;
mod yaml;

pub use self::json::JsonCodec;
pub use self::properties::PropertiesCodec;
pub use self::xml::XmlCodec;
pub use self::yaml::{YamlCodec, YamlOptions};
pub use plaintext::PlainTextCodec;

use serde_json::{Map, Value};

/// Recursively sort mapping keys.
pub(crate) fn sort_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted = Map::new();
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.clone(), sort_value(v));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        other => other.clone(),
    }
}

/// Text form of a scalar for line-oriented formats; `None` for containers.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
