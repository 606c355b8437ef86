//! # Value Model
//!
//! Closed tagged union for observed and expected state trees. Every check
//! compares two of these; there is no open-ended dynamic typing anywhere in
//! the comparator.

use crate::types::error::ValueError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leaf value of a state tree
///
/// Scalars compare by normalized string form, so `Int(42)` and `Str("42")`
/// are equal. This is a deliberate relaxation: observed state and policy
/// documents are decoded from text and frequently disagree on numeric types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Canonical string form used for comparison and message rendering
    pub fn normalized(&self) -> String {
        match self {
            Scalar::Str(s) => s.clone(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Null => "null".to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => write!(f, "{}", s),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null => write!(f, "null"),
        }
    }
}

/// Insertion-ordered string-keyed mapping
///
/// Keys are unique; insertion order is irrelevant for comparison but is
/// preserved so mismatch reports come out in the order the policy document
/// declared its keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a key, replacing any existing entry in place
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

/// Kind tag for dispatch and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Sequence,
    Mapping,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A state tree node: scalar leaf, ordered sequence, or string-keyed mapping
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Shorthand constructor for string scalars
    pub fn str(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Str(s.into()))
    }

    pub fn int(i: i64) -> Self {
        Value::Scalar(Scalar::Int(i))
    }

    pub fn bool(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }

    pub fn null() -> Self {
        Value::Scalar(Scalar::Null)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// True for the null/absent scalar marker
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::Null))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Compact single-line rendering used inside mismatch messages
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "{}", s),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Mapping(mapping) => {
                write!(f, "{{")?;
                for (i, (key, value)) in mapping.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn key_from_yaml(key: &serde_yaml::Value) -> Result<String, ValueError> {
    // YAML keys are frequently unquoted numbers (VLAN IDs, ASNs); carry
    // them as their normalized string form
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        other => Err(ValueError::UnsupportedKey {
            key: format!("{:?}", other),
        }),
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = ValueError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        match value {
            serde_yaml::Value::Null => Ok(Value::null()),
            serde_yaml::Value::Bool(b) => Ok(Value::bool(b)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::int(i))
                } else {
                    // u64 overflow and floats fall back to their string
                    // rendering; scalar comparison is string-normalized
                    Ok(Value::str(n.to_string()))
                }
            }
            serde_yaml::Value::String(s) => Ok(Value::Scalar(Scalar::Str(s))),
            serde_yaml::Value::Sequence(items) => Ok(Value::Sequence(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            serde_yaml::Value::Mapping(mapping) => {
                let mut result = Mapping::new();
                for (key, value) in mapping {
                    result.insert(key_from_yaml(&key)?, Value::try_from(value)?);
                }
                Ok(Value::Mapping(result))
            }
            serde_yaml::Value::Tagged(tagged) => Err(ValueError::UnsupportedNode {
                reason: format!("tagged value '{}'", tagged.tag),
            }),
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Ok(Value::null()),
            serde_json::Value::Bool(b) => Ok(Value::bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::int(i))
                } else {
                    Ok(Value::str(n.to_string()))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Scalar(Scalar::Str(s))),
            serde_json::Value::Array(items) => Ok(Value::Sequence(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            serde_json::Value::Object(object) => {
                let mut result = Mapping::new();
                for (key, value) in object {
                    result.insert(key, Value::try_from(value)?);
                }
                Ok(Value::Mapping(result))
            }
        }
    }
}
