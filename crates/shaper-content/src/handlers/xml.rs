//! XML codec
//!
//! Maps elements onto values the way hand-written XML configs read best:
//! attributes become `@name` keys, mixed text becomes `#text`, a text-only
//! element is a string and an empty element is null. Repeated siblings are
//! collected into a sequence, and written back as repeated siblings named
//! after their key rather than folded under an `<item>` wrapper.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::{Map, Value};

use super::scalar_text;
use crate::error::{Error, Result};
use crate::format::{Format, FormatCodec};

const ATTRIBUTE_PREFIX: char = '@';
const TEXT_KEY: &str = "#text";

/// Codec for `.xml` files
#[derive(Debug, Default)]
pub struct XmlCodec;

impl XmlCodec {
    pub fn new() -> Self {
        Self
    }
}

impl FormatCodec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn decode(&self, source: &str) -> Result<Value> {
        decode_document(source)
    }

    fn encode(&self, value: &Value) -> Result<String> {
        let (root, content) = match value {
            Value::Object(map) if map.len() == 1 => map
                .iter()
                .next()
                .ok_or_else(|| Error::serialize(Format::Xml, "document has no root element"))?,
            Value::Object(map) => {
                return Err(Error::serialize(
                    Format::Xml,
                    format!("document needs exactly one root element, found {}", map.len()),
                ));
            }
            _ => {
                return Err(Error::serialize(
                    Format::Xml,
                    "document must be a mapping with a single root element",
                ));
            }
        };
        if content.is_array() {
            return Err(Error::serialize(
                Format::Xml,
                format!("root element {root:?} cannot be a sequence"),
            ));
        }

        let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(write_error)?;
        write_element(&mut writer, root, content)?;

        let mut out = String::from_utf8(writer.into_inner())
            .map_err(|e| Error::serialize(Format::Xml, e.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}

/// Element under construction while reading.
#[derive(Default)]
struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(parse_error)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(parse_error)?;
            attributes.insert(
                format!("{ATTRIBUTE_PREFIX}{key}"),
                Value::String(value.into_owned()),
            );
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn close(self) -> (String, Value) {
        let value = if self.attributes.is_empty() && self.children.is_empty() {
            if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text)
            }
        } else {
            let mut map = self.attributes;
            map.extend(self.children);
            if !self.text.is_empty() {
                map.insert(TEXT_KEY.to_string(), Value::String(self.text));
            }
            Value::Object(map)
        };
        (self.name, value)
    }
}

fn decode_document(source: &str) -> Result<Value> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    let mut finish = |stack: &mut Vec<Frame>, frame: Frame| -> Result<()> {
        let (name, value) = frame.close();
        match stack.last_mut() {
            Some(parent) => parent.add_child(name, value),
            None if root.is_some() => {
                return Err(Error::parse(
                    Format::Xml,
                    format!("second root element <{name}>"),
                ));
            }
            None => root = Some((name, value)),
        }
        Ok(())
    };

    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let frame = Frame::open(&start)?;
                finish(&mut stack, frame)?;
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| Error::parse(Format::Xml, "unexpected closing tag"))?;
                finish(&mut stack, frame)?;
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape().map_err(parse_error)?);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::parse(
            Format::Xml,
            format!("element <{}> is never closed", open.name),
        ));
    }

    let (name, value) = root.ok_or_else(|| Error::parse(Format::Xml, "document has no root element"))?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

fn write_element(writer: &mut Writer<Vec<u8>>, key: &str, value: &Value) -> Result<()> {
    // Sequences repeat the element under the same key
    if let Value::Array(items) = value {
        for item in items {
            write_element(writer, key, item)?;
        }
        return Ok(());
    }

    let (name, original) = element_name(key);
    let mut start = BytesStart::new(name.as_str());
    if let Some(original) = &original {
        start.push_attribute(("name", original.as_str()));
    }

    match value {
        Value::Object(map) => {
            let mut text = None;
            let mut children = Vec::new();
            for (child_key, child) in map {
                if child_key == TEXT_KEY {
                    text = Some(leaf_text(child_key, child)?);
                } else if let Some(attr) = child_key.strip_prefix(ATTRIBUTE_PREFIX) {
                    start.push_attribute((attr, leaf_text(child_key, child)?.as_str()));
                } else {
                    children.push((child_key, child));
                }
            }

            if children.is_empty() && text.is_none() {
                return writer.write_event(Event::Empty(start)).map_err(write_error);
            }
            writer.write_event(Event::Start(start)).map_err(write_error)?;
            if let Some(text) = text {
                writer
                    .write_event(Event::Text(BytesText::new(&text)))
                    .map_err(write_error)?;
            }
            for (child_key, child) in children {
                write_element(writer, child_key, child)?;
            }
        }
        Value::Null => return writer.write_event(Event::Empty(start)).map_err(write_error),
        scalar => {
            let text = leaf_text(key, scalar)?;
            writer.write_event(Event::Start(start)).map_err(write_error)?;
            writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(write_error)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(write_error)
}

fn leaf_text(key: &str, value: &Value) -> Result<String> {
    scalar_text(value).ok_or_else(|| {
        Error::serialize(Format::Xml, format!("{key:?} must hold a scalar value"))
    })
}

/// Element name for a key, plus the original key when it had to be replaced.
fn element_name(key: &str) -> (String, Option<String>) {
    if is_valid_name(key) {
        return (key.to_string(), None);
    }
    if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) {
        return (format!("n{key}"), None);
    }
    let underscored = key.replace(' ', "_");
    if is_valid_name(&underscored) {
        return (underscored, None);
    }
    ("key".to_string(), Some(key.to_string()))
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}

fn parse_error(e: impl std::fmt::Display) -> Error {
    Error::parse(Format::Xml, e.to_string())
}

fn write_error(e: impl std::fmt::Display) -> Error {
    Error::serialize(Format::Xml, e.to_string())
}
