//! # Compliance Report Types
//!
//! The nested mismatch report produced by a compliance run. These types are
//! designed for serialization to JSON and integration with external
//! reporting tooling; the tree shape mirrors the policy document so every
//! mismatch is path-addressable.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// One branch of the error tree
///
/// Either a single mismatch message, a flat list of messages (sequence and
/// config-line checks), or a nested tree keyed by the mismatching keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    Message(String),
    List(Vec<String>),
    Nested(ErrorTree),
}

impl Violation {
    /// Empty-equivalent branches carry no mismatch and are pruned
    pub fn is_empty(&self) -> bool {
        match self {
            Violation::Message(_) => false,
            Violation::List(messages) => messages.is_empty(),
            Violation::Nested(tree) => tree.is_empty(),
        }
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Violation::Message(message) => serializer.serialize_str(message),
            Violation::List(messages) => messages.serialize(serializer),
            Violation::Nested(tree) => tree.serialize(serializer),
        }
    }
}

/// Insertion-ordered map from check name or key to its violation
///
/// Invariant: never contains an empty branch. `insert` prunes
/// empty-equivalent violations, so `is_empty` is the pass/fail test.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorTree {
    entries: Vec<(String, Violation)>,
}

impl ErrorTree {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Attach a violation under a key, dropping empty-equivalent branches
    pub fn insert(&mut self, key: impl Into<String>, violation: Violation) {
        if violation.is_empty() {
            return;
        }
        self.entries.push((key.into(), violation));
    }

    pub fn get(&self, key: &str) -> Option<&Violation> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Violation)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, violation) in &self.entries {
            map.serialize_entry(key, violation)?;
        }
        map.end()
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(rendered) => write!(f, "{}", rendered),
            Err(_) => write!(f, "<unrenderable error tree>"),
        }
    }
}

/// Top-level outcome of a compliance run
///
/// Exactly one of: the success marker, or a non-empty error tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplianceReport {
    Compliant,
    Violations(ErrorTree),
}

impl ComplianceReport {
    /// Collapse an aggregated tree into the run outcome
    pub fn from_tree(tree: ErrorTree) -> Self {
        if tree.is_empty() {
            ComplianceReport::Compliant
        } else {
            ComplianceReport::Violations(tree)
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, ComplianceReport::Compliant)
    }

    pub fn violations(&self) -> Option<&ErrorTree> {
        match self {
            ComplianceReport::Compliant => None,
            ComplianceReport::Violations(tree) => Some(tree),
        }
    }
}

impl Serialize for ComplianceReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ComplianceReport::Compliant => serializer.serialize_bool(true),
            ComplianceReport::Violations(tree) => tree.serialize(serializer),
        }
    }
}
