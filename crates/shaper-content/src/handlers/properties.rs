//! Properties codec
//!
//! Reads line-oriented `key=value` files with the rules of an INI option
//! block:
//!
//! - `=` or `:` separates key and value (first occurrence wins)
//! - whitespace around keys and values is trimmed
//! - lines indented deeper than their key continue its value, whatever
//!   they start with
//! - other full-line comments start with `#` or `;`
//!
//! Raw content has every `%` doubled before parsing and every `%%` undone
//! afterwards, so keys and values come back exactly as written.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::scalar_text;
use crate::error::{Error, Result};
use crate::format::{Format, FormatCodec};

const CONTINUATION_INDENT: &str = "  ";

/// Codec for `.properties` files
#[derive(Debug, Default)]
pub struct PropertiesCodec;

impl PropertiesCodec {
    pub fn new() -> Self {
        Self
    }
}

impl FormatCodec for PropertiesCodec {
    fn format(&self) -> Format {
        Format::Properties
    }

    fn decode(&self, source: &str) -> Result<Value> {
        let escaped = escape_percent(source);
        let raw = parse_entries(&escaped)?;

        let map: Map<String, Value> = raw
            .into_iter()
            .map(|(key, value)| (unescape_percent(&key), Value::String(unescape_percent(&value))))
            .collect();
        Ok(Value::Object(map))
    }

    fn encode(&self, value: &Value) -> Result<String> {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(String::new()),
            _ => {
                return Err(Error::serialize(
                    Format::Properties,
                    "top-level value must be a mapping",
                ));
            }
        };

        let continuation = format!("\n{CONTINUATION_INDENT}");
        let mut lines = Vec::with_capacity(map.len());
        for (key, value) in map {
            let text = scalar_text(value).ok_or_else(|| {
                Error::serialize(
                    Format::Properties,
                    format!("value of {key:?} is nested and cannot be written as a property"),
                )
            })?;
            lines.push(format!("{key}={}", text.split('\n').collect::<Vec<_>>().join(&continuation)));
        }
        Ok(lines.join("\n"))
    }
}

fn escape_percent(source: &str) -> String {
    source.replace('%', "%%")
}

/// Inverse of [`escape_percent`] for text that went through it.
fn unescape_percent(escaped: &str) -> String {
    escaped.replace("%%", "%")
}

fn parse_entries(source: &str) -> Result<IndexMap<String, String>> {
    let mut entries: IndexMap<String, Vec<String>> = IndexMap::new();
    // Key currently collecting continuation lines, with its indentation
    let mut current: Option<(String, usize)> = None;

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let stripped = line.trim();

        if stripped.is_empty() {
            if let Some((key, _)) = &current {
                if let Some(lines) = entries.get_mut(key) {
                    lines.push(String::new());
                }
            }
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        if let Some((key, key_indent)) = &current {
            if indent > *key_indent {
                if let Some(lines) = entries.get_mut(key) {
                    lines.push(stripped.to_string());
                }
                continue;
            }
        }

        if stripped.starts_with('#') || stripped.starts_with(';') {
            continue;
        }

        if stripped.starts_with('[') && stripped.ends_with(']') && stripped.len() > 2 {
            return Err(Error::parse(
                Format::Properties,
                format!("line {line_no}: section headers are not supported: {stripped:?}"),
            ));
        }

        let Some(delimiter) = stripped.find(['=', ':']) else {
            return Err(Error::parse(
                Format::Properties,
                format!("line {line_no}: expected `key=value`, found {stripped:?}"),
            ));
        };

        let key = stripped[..delimiter].trim_end();
        if key.is_empty() {
            return Err(Error::parse(
                Format::Properties,
                format!("line {line_no}: missing key before delimiter"),
            ));
        }
        if entries.contains_key(key) {
            return Err(Error::parse(
                Format::Properties,
                format!("line {line_no}: duplicate key {key:?}"),
            ));
        }

        let value = stripped[delimiter + 1..].trim();
        entries.insert(key.to_string(), vec![value.to_string()]);
        current = Some((key.to_string(), indent));
    }

    Ok(entries
        .into_iter()
        .map(|(key, lines)| (key, lines.join("\n").trim_end().to_string()))
        .collect())
}
