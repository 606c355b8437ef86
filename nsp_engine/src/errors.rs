//! # Orchestrator Errors
//!
//! Fatal configuration errors for a compliance run. These abort the run
//! immediately and surface to the caller as `Err`; they are disjoint from
//! compliance mismatches, which are accumulated into the error tree and
//! returned as data.

use crate::subject::ACCESSOR_PREFIX;
use nsp_core::ValueError;

/// Comprehensive error type for compliance runs
#[derive(Debug, thiserror::Error)]
pub enum ComplianceError {
    /// Requested check name does not exist on the subject
    #[error("accessor '{name}' not found on subject")]
    UnknownAccessor { name: String },

    /// Requested check name does not follow the accessor naming convention
    #[error("'{name}' does not follow the '{ACCESSOR_PREFIX}' accessor naming convention")]
    InvalidAccessorName { name: String },

    /// Configuration region other than running/candidate
    #[error("'{region}' config not supported, only running or candidate are allowed")]
    UnsupportedRegion { region: String },

    /// Policy document has no entry for a requested check
    #[error("'{key}' key not found in policy document, check your syntax")]
    MissingPolicyEntry { key: String },

    /// Policy document is not parsable YAML
    #[error("failed to parse policy document: {0}")]
    PolicyParse(#[from] serde_yaml::Error),

    /// Policy document parsed but cannot be translated into the value model
    #[error("unusable policy document: {0}")]
    PolicyShape(#[from] ValueError),

    /// Policy file could not be read
    #[error("failed to read policy file '{path}': {source}")]
    PolicyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Subject reports the accessor as unimplemented; the check cannot be
    /// evaluated at all, which is distinct from the check failing
    #[error("accessor '{name}' is not implemented by this subject")]
    AccessorNotImplemented { name: String },

    /// Subject failed while producing the observed state
    #[error("accessor '{name}' failed: {reason}")]
    AccessorFailed { name: String, reason: String },
}
