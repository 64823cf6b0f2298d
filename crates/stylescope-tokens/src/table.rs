//! Token table data model.
//!
//! A token table is an ordered tree: groups (design-token categories such as
//! `colors` or a color family like `blue`) map keys to either nested groups or
//! leaf values (`"#1e40af"`, `["Inter", "sans-serif"]`, ...).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::TokenError;

/// A single entry in a token table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// Nested category, merged key-by-key.
    Group(TokenTable),

    /// Any non-object value. Replaced wholesale on merge.
    Leaf(Value),
}

/// Structural kind of a [`TokenValue`], used in merge diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Group,
    Leaf,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Group => write!(f, "group"),
            ValueKind::Leaf => write!(f, "leaf"),
        }
    }
}

impl TokenValue {
    /// Convert a JSON value, turning every object into a group.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => TokenValue::Group(TokenTable::from(map)),
            other => TokenValue::Leaf(other),
        }
    }

    /// Convert back into a plain JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            TokenValue::Group(table) => table.to_json(),
            TokenValue::Leaf(value) => value.clone(),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            TokenValue::Group(_) => ValueKind::Group,
            TokenValue::Leaf(_) => ValueKind::Leaf,
        }
    }

    pub fn as_group(&self) -> Option<&TokenTable> {
        match self {
            TokenValue::Group(table) => Some(table),
            TokenValue::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            TokenValue::Leaf(value) => Some(value),
            TokenValue::Group(_) => None,
        }
    }

    /// Leaf value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.as_leaf().and_then(|v| v.as_str())
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Leaf(Value::String(value.to_string()))
    }
}

impl From<TokenTable> for TokenValue {
    fn from(table: TokenTable) -> Self {
        TokenValue::Group(table)
    }
}

/// Ordered mapping from token keys to values.
///
/// Insertion order is preserved so resolved output is deterministic, but it
/// plays no part in equality or lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTable(IndexMap<String, TokenValue>);

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a JSON object.
    pub fn from_json(value: Value) -> Result<Self, TokenError> {
        match TokenValue::from_json(value) {
            TokenValue::Group(table) => Ok(table),
            TokenValue::Leaf(leaf) => Err(TokenError::NotATable(json_type_name(&leaf))),
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a key. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TokenValue>) -> Option<TokenValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&TokenValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a value by dotted path, e.g. `colors.blue.500`.
    ///
    /// Keys may themselves contain dots (`spacing.0.5`), so at each level the
    /// longest key that matches a prefix of the remaining path wins.
    pub fn get_path(&self, path: &str) -> Option<&TokenValue> {
        if path.is_empty() {
            return None;
        }
        if let Some(value) = self.0.get(path) {
            return Some(value);
        }
        let splits: Vec<usize> = path.match_indices('.').map(|(i, _)| i).collect();
        for &i in splits.iter().rev() {
            let (head, rest) = (&path[..i], &path[i + 1..]);
            if let Some(TokenValue::Group(inner)) = self.0.get(head) {
                if let Some(found) = inner.get_path(rest) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// All leaves as `(dotted path, value)` pairs, depth-first in insertion order.
    pub fn leaf_paths(&self) -> Vec<(String, &Value)> {
        let mut out = Vec::new();
        self.collect_leaves(String::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: String, out: &mut Vec<(String, &'a Value)>) {
        for (key, value) in &self.0 {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match value {
                TokenValue::Leaf(leaf) => out.push((path, leaf)),
                TokenValue::Group(inner) => inner.collect_leaves(path, out),
            }
        }
    }
}

impl FromIterator<(String, TokenValue)> for TokenTable {
    fn from_iter<I: IntoIterator<Item = (String, TokenValue)>>(iter: I) -> Self {
        TokenTable(iter.into_iter().collect())
    }
}

impl From<serde_json::Map<String, Value>> for TokenTable {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter()
            .map(|(k, v)| (k, TokenValue::from_json(v)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a TokenTable {
    type Item = (&'a String, &'a TokenValue);
    type IntoIter = indexmap::map::Iter<'a, String, TokenValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// JSON type name for diagnostics (`"object"`, `"array"`, ...).
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
