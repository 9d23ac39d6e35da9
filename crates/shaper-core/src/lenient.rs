//! Liquid globals where unknown names and keys render as nothing
//!
//! Liquid fails a render on any variable or mapping key it cannot find.
//! Playbook templates are rendered against a [`LenientObject`] instead: an
//! unknown name, or an unknown key of a mapping, resolves to [`Missing`],
//! which renders as an empty string, is falsy, and has no keys of its own.
//! Mappings inside sequences keep liquid's usual lookup.

use std::fmt;

use indexmap::IndexMap;
use liquid::model::{DisplayCow, KString, KStringCow, State, Value};
use liquid::{ObjectView, ValueView};
use serde_json::Map;

/// Stand-in for a name or key the context does not have.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Missing;

impl ValueView for Missing {
    fn as_debug(&self) -> &dyn fmt::Debug {
        self
    }

    fn render(&self) -> DisplayCow<'_> {
        DisplayCow::Borrowed(&"")
    }

    fn source(&self) -> DisplayCow<'_> {
        DisplayCow::Borrowed(&"nil")
    }

    fn type_name(&self) -> &'static str {
        "nil"
    }

    fn query_state(&self, state: State) -> bool {
        !matches!(state, State::Truthy)
    }

    fn to_kstr(&self) -> KStringCow<'_> {
        KStringCow::from_static("")
    }

    fn to_value(&self) -> Value {
        Value::Nil
    }

    // Lets `missing.key` chains resolve to Missing again
    fn as_object(&self) -> Option<&dyn ObjectView> {
        Some(self)
    }

    fn is_nil(&self) -> bool {
        true
    }
}

impl ObjectView for Missing {
    fn as_value(&self) -> &dyn ValueView {
        self
    }

    fn size(&self) -> i64 {
        0
    }

    fn keys<'k>(&'k self) -> Box<dyn Iterator<Item = KStringCow<'k>> + 'k> {
        Box::new(std::iter::empty())
    }

    fn values<'k>(&'k self) -> Box<dyn Iterator<Item = &'k dyn ValueView> + 'k> {
        Box::new(std::iter::empty())
    }

    fn iter<'k>(&'k self) -> Box<dyn Iterator<Item = (KStringCow<'k>, &'k dyn ValueView)> + 'k> {
        Box::new(std::iter::empty())
    }

    fn contains_key(&self, _index: &str) -> bool {
        false
    }

    fn get<'s>(&'s self, _index: &str) -> Option<&'s dyn ValueView> {
        Some(&Missing)
    }
}

#[derive(Debug)]
enum Field {
    Object(LenientObject),
    Value(Value),
}

impl Field {
    fn view(&self) -> &dyn ValueView {
        match self {
            Field::Object(object) => object,
            Field::Value(value) => value,
        }
    }
}

/// Mapping view over a template context.
#[derive(Debug, Default)]
pub(crate) struct LenientObject {
    fields: IndexMap<String, Field>,
    /// Claims every name, so liquid asks this object instead of failing.
    /// Only set on the root, where no template can test membership.
    open: bool,
}

impl LenientObject {
    /// Root globals for a render.
    pub(crate) fn globals(context: &Map<String, serde_json::Value>) -> Result<Self, liquid::Error> {
        let mut globals = Self::from_context(context)?;
        globals.open = true;
        Ok(globals)
    }

    fn from_context(context: &Map<String, serde_json::Value>) -> Result<Self, liquid::Error> {
        let mut fields = IndexMap::with_capacity(context.len());
        for (key, value) in context {
            let field = match value {
                serde_json::Value::Object(nested) => Field::Object(Self::from_context(nested)?),
                other => Field::Value(liquid::model::to_value(other)?),
            };
            fields.insert(key.clone(), field);
        }
        Ok(Self {
            fields,
            open: false,
        })
    }

    fn to_object(&self) -> liquid::Object {
        self.fields
            .iter()
            .map(|(key, field)| (KString::from(key.clone()), field.view().to_value()))
            .collect()
    }
}

impl ValueView for LenientObject {
    fn as_debug(&self) -> &dyn fmt::Debug {
        self
    }

    fn render(&self) -> DisplayCow<'_> {
        let rendered = self.to_object().render().to_string();
        DisplayCow::Owned(Box::new(rendered))
    }

    fn source(&self) -> DisplayCow<'_> {
        let source = self.to_object().source().to_string();
        DisplayCow::Owned(Box::new(source))
    }

    fn type_name(&self) -> &'static str {
        "object"
    }

    fn query_state(&self, state: State) -> bool {
        match state {
            State::Truthy => true,
            State::DefaultValue | State::Empty | State::Blank => self.fields.is_empty(),
        }
    }

    fn to_kstr(&self) -> KStringCow<'_> {
        KStringCow::from_string(self.to_object().render().to_string())
    }

    fn to_value(&self) -> Value {
        Value::Object(self.to_object())
    }

    fn as_object(&self) -> Option<&dyn ObjectView> {
        Some(self)
    }
}

impl ObjectView for LenientObject {
    fn as_value(&self) -> &dyn ValueView {
        self
    }

    fn size(&self) -> i64 {
        self.fields.len() as i64
    }

    fn keys<'k>(&'k self) -> Box<dyn Iterator<Item = KStringCow<'k>> + 'k> {
        Box::new(self.fields.keys().map(|key| KStringCow::from(key.as_str())))
    }

    fn values<'k>(&'k self) -> Box<dyn Iterator<Item = &'k dyn ValueView> + 'k> {
        Box::new(self.fields.values().map(Field::view))
    }

    fn iter<'k>(&'k self) -> Box<dyn Iterator<Item = (KStringCow<'k>, &'k dyn ValueView)> + 'k> {
        Box::new(
            self.fields
                .iter()
                .map(|(key, field)| (KStringCow::from(key.as_str()), field.view())),
        )
    }

    fn contains_key(&self, index: &str) -> bool {
        self.open || self.fields.contains_key(index)
    }

    fn get<'s>(&'s self, index: &str) -> Option<&'s dyn ValueView> {
        match self.fields.get(index) {
            Some(field) => Some(field.view()),
            // Leaves liquid's built-in `size` property reachable
            None if index == "size" => None,
            None => Some(&Missing),
        }
    }
}
