//! Format codecs for shaper
//!
//! Each supported file format has a codec that turns file content into a
//! [`serde_json::Value`] and back. The [`FormatRegistry`] picks the codec
//! from a file's extension and keeps batch operations going when a single
//! file fails.
//!
//! Values keep mapping order end to end (`serde_json` is built with
//! `preserve_order`), so a human-edited file round-trips in its own order.

pub mod error;
pub mod format;
pub mod handlers;
pub mod registry;

pub use error::{Error, FailureKind, Result};
pub use format::{Format, FormatCodec};
pub use handlers::{JsonCodec, PlainTextCodec, PropertiesCodec, XmlCodec, YamlCodec, YamlOptions};
pub use registry::{FormatRegistry, RegistryConfig};
