//! # NSP Engine - Compliance Orchestrator
//!
//! Drives the `nsp_core` comparator across a named set of checks against a
//! subject (the externally managed system under validation), assembles
//! per-check results into one report, and loads YAML policy documents.

pub mod compliance;
pub mod errors;
pub mod policy;
pub mod subject;

// Convenience re-exports
pub use compliance::{evaluate_accessors, evaluate_all, evaluate_configuration};
pub use errors::ComplianceError;
pub use policy::{load_policy_file, load_policy_str};
pub use subject::{
    AccessorError, AccessorRegistry, ConfigRegion, RegistryBuilder, RegistryError, Subject,
    ACCESSOR_PREFIX,
};

pub mod prelude {
    pub use crate::compliance::{evaluate_accessors, evaluate_all, evaluate_configuration};
    pub use crate::errors::ComplianceError;
    pub use crate::policy::{load_policy_file, load_policy_str};
    pub use crate::subject::{
        AccessorError, AccessorRegistry, ConfigRegion, RegistryBuilder, RegistryError, Subject,
    };

    pub use nsp_core::{compare, ComplianceReport, ErrorTree, Mapping, Value, Violation};
}
