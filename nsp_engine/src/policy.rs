//! # Policy Document Loader
//!
//! Parses an externally authored YAML document into the specification tree:
//! a mapping from check name to expected state, optionally containing the
//! `running`/`candidate` regions with their expected configuration lines.
//! Parse and shape failures are configuration errors, never compliance
//! mismatches.

use crate::errors::ComplianceError;
use nsp_core::{Mapping, Value, ValueError};
use std::path::Path;

/// Parse YAML policy text into a specification tree
pub fn load_policy_str(text: &str) -> Result<Mapping, ComplianceError> {
    let document: serde_yaml::Value = serde_yaml::from_str(text)?;
    match Value::try_from(document)? {
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(ComplianceError::PolicyShape(ValueError::UnsupportedNode {
            reason: format!("policy document must be a mapping, got a {}", other.kind()),
        })),
    }
}

/// Read and parse a YAML policy file
pub fn load_policy_file(path: impl AsRef<Path>) -> Result<Mapping, ComplianceError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ComplianceError::PolicyFile {
        path: path.display().to_string(),
        source,
    })?;
    load_policy_str(&text)
}
