//! # NSP Core - Network State Policy comparator
//!
//! Pure structural compliance checking: a closed value model, a recursive
//! comparator with "expected is a structural subset of actual" semantics,
//! and the nested error-tree types produced by a compliance run.

pub mod compare;
pub mod report;
pub mod types;

// Convenience re-exports
pub use compare::compare;
pub use report::{ComplianceReport, ErrorTree, Violation};
pub use types::{Mapping, Scalar, Value, ValueError, ValueKind};
