//! Conversion between flat path maps and nested trees
//!
//! A flat map is keyed by `/`-joined relative paths (`svc/app.properties`),
//! a nested tree by single path segments:
//!
//! ```text
//! svc/app.properties -> {port: "8080"}      svc:
//! svc/conf/db.json   -> {url: "..."}    <=>   app.properties: {port: "8080"}
//!                                             conf:
//!                                               db.json: {url: "..."}
//! ```
//!
//! Where nesting stops is decided by the segment alone: a segment with a
//! `.` in it names a file, so its value is a leaf whatever its shape.
//! `backward(forward(m)) == m`, order included, for every map whose keys
//! follow that rule.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Separator between path segments in a key.
pub const SEPARATOR: char = '/';

/// Ordered `path key -> file contents` mapping, one entry per file.
pub type FlatMap = IndexMap<String, Value>;

/// Nested mapping keyed by path segments.
pub type Tree = Map<String, Value>;

/// Whether a path segment names a file rather than a directory.
pub fn is_leaf_segment(segment: &str) -> bool {
    segment.contains('.')
}

/// Build a nested tree from flat `(path key, value)` entries, usually a
/// [`FlatMap`].
///
/// Entries sharing a prefix end up under the same node. When two entries
/// resolve to the same full path the later one wins, keeping the position
/// of the first.
pub fn forward<I>(entries: I) -> Tree
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut tree = Tree::new();
    for (key, value) in entries {
        let segments: Vec<&str> = key.split(SEPARATOR).collect();
        insert_path(&mut tree, &segments, value, &key);
    }
    tree
}

/// Flatten a nested tree back into a flat map.
///
/// Leaves come out in depth-first pre-order over the tree's own ordering.
pub fn backward(tree: &Tree) -> FlatMap {
    let mut flat = FlatMap::new();
    flatten_into(tree, None, &mut flat);
    flat
}

/// Borrow a document as a tree, rejecting non-mapping roots.
pub fn as_tree(document: &Value) -> Result<&Tree> {
    match document {
        Value::Object(tree) => Ok(tree),
        other => Err(Error::NotATree {
            found: kind_name(other),
        }),
    }
}

/// Owned version of [`as_tree`].
pub fn into_tree(document: Value) -> Result<Tree> {
    match document {
        Value::Object(tree) => Ok(tree),
        other => Err(Error::NotATree {
            found: kind_name(&other),
        }),
    }
}

fn insert_path(level: &mut Tree, segments: &[&str], value: Value, key: &str) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        level.insert((*first).to_string(), value);
        return;
    }

    match level.get_mut(*first) {
        Some(Value::Object(child)) => insert_path(child, rest, value, key),
        Some(existing) => {
            tracing::warn!(
                key,
                segment = *first,
                "path descends through a non-mapping value, replacing it"
            );
            *existing = nest(rest, value);
        }
        None => {
            level.insert((*first).to_string(), nest(rest, value));
        }
    }
}

/// Wrap `value` in one single-key mapping per segment, innermost last.
fn nest(segments: &[&str], value: Value) -> Value {
    segments.iter().rev().fold(value, |inner, segment| {
        let mut node = Map::new();
        node.insert((*segment).to_string(), inner);
        Value::Object(node)
    })
}

fn flatten_into(level: &Tree, prefix: Option<&str>, out: &mut FlatMap) {
    for (segment, value) in level {
        let key = match prefix {
            Some(prefix) => format!("{prefix}{SEPARATOR}{segment}"),
            None => segment.clone(),
        };

        match value {
            Value::Object(child) if !is_leaf_segment(segment) => {
                flatten_into(child, Some(&key), out);
            }
            // Dot-less keys holding scalars cannot be descended into
            _ => {
                out.insert(key, value.clone());
            }
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
