//! Safe navigation over a decoded document tree.
//!
//! Absence is never an error here: a missing key, an explicit `null`, or a
//! lookup below an absent parent all yield an absent `Node`. Only a value of
//! the wrong JSON type produces an `AccessError`, so rule checkers can treat
//! "missing" as a finding and "malformed" as an engine failure.

use crate::error::AccessError;
use serde_json::Value as Json;

/// Resolve a dot-separated path, returning `None` on any absence or
/// non-object intermediate.
pub fn get_path<'a>(tree: &'a Json, path: &str) -> Option<&'a Json> {
    path.split('.')
        .filter(|seg| !seg.is_empty())
        .try_fold(tree, |cur, key| cur.as_object()?.get(key))
        .filter(|v| !v.is_null())
}

/// Human-readable JSON type name used in diagnostics.
pub fn type_name(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

/// A possibly-absent position in the tree, carrying its dotted path.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    value: Option<&'a Json>,
    path: String,
}

impl<'a> Node<'a> {
    /// Start navigation at `value`, reporting paths relative to `path`.
    pub fn new(value: Option<&'a Json>, path: impl Into<String>) -> Self {
        Self {
            value: value.filter(|v| !v.is_null()),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn value(&self) -> Option<&'a Json> {
        self.value
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Python-style truthiness: absent, `false`, `0`, and empty
    /// strings/arrays/objects are all falsy.
    pub fn is_truthy(&self) -> bool {
        match self.value {
            None | Some(Json::Null) => false,
            Some(Json::Bool(b)) => *b,
            Some(Json::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Json::String(s)) => !s.is_empty(),
            Some(Json::Array(a)) => !a.is_empty(),
            Some(Json::Object(o)) => !o.is_empty(),
        }
    }

    /// Descend into `key`. Fails only when this node is present but is not
    /// an object.
    pub fn field(&self, key: &str) -> Result<Node<'a>, AccessError> {
        let path = self.child_path(key);
        match self.value {
            None => Ok(Node { value: None, path }),
            Some(Json::Object(map)) => Ok(Node::new(map.get(key), path)),
            Some(other) => Err(self.mismatch("object", other)),
        }
    }

    /// Whether `key` exists on this object, even with a `null` value.
    pub fn has(&self, key: &str) -> Result<bool, AccessError> {
        match self.value {
            None => Ok(false),
            Some(Json::Object(map)) => Ok(map.contains_key(key)),
            Some(other) => Err(self.mismatch("object", other)),
        }
    }

    pub fn as_str(&self) -> Result<Option<&'a str>, AccessError> {
        match self.value {
            None => Ok(None),
            Some(Json::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.mismatch("string", other)),
        }
    }

    /// Elements of an array; an absent node has no elements.
    pub fn items(&self) -> Result<Vec<Node<'a>>, AccessError> {
        match self.value {
            None => Ok(Vec::new()),
            Some(Json::Array(items)) => Ok(items
                .iter()
                .enumerate()
                .map(|(idx, v)| Node::new(Some(v), format!("{}[{}]", self.path, idx)))
                .collect()),
            Some(other) => Err(self.mismatch("array", other)),
        }
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn mismatch(&self, expected: &'static str, found: &Json) -> AccessError {
        AccessError {
            path: self.path.clone(),
            expected,
            found: type_name(found),
        }
    }
}
