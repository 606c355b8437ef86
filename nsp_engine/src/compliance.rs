//! # Compliance Orchestrator
//!
//! Drives the comparator across a named set of checks: each accessor's
//! observed state is compared against its policy entry, and configuration
//! regions are checked for verbatim line membership. Per-check results are
//! aggregated into one error tree keyed by check name; empty results are
//! omitted entirely, so an empty tree collapses to the success marker.
//!
//! Check names are validated up front (accessor prefix + existence on the
//! subject) and the whole run fails fast on the first configuration error.
//! Mismatches never abort the run; they come back as report data.

use crate::errors::ComplianceError;
use crate::subject::{AccessorError, ConfigRegion, Subject, ACCESSOR_PREFIX};
use log::{debug, warn};
use nsp_core::{compare, ComplianceReport, ErrorTree, Mapping, Value, Violation};

/// Synthetic key a bare-sequence check result is wrapped under, so the
/// mapping-comparison path applies uniformly
pub const NOT_MATCHED_KEY: &str = "not_matched";

/// Run an explicit list of accessor checks against the subject
pub fn evaluate_accessors(
    subject: &dyn Subject,
    policy: &Mapping,
    checks: &[&str],
) -> Result<ComplianceReport, ComplianceError> {
    // Fail fast on every name before invoking anything
    for name in checks {
        validate_check_name(subject, name)?;
    }

    let mut errors = ErrorTree::new();
    for name in checks {
        if let Some(violation) = run_accessor_check(subject, policy, name)? {
            warn!("check '{}' recorded mismatches", name);
            errors.insert(*name, violation);
        }
    }

    Ok(ComplianceReport::from_tree(errors))
}

/// Check that every expected line appears verbatim in the region's
/// configuration text
pub fn evaluate_configuration(
    subject: &dyn Subject,
    policy: &Mapping,
    region: ConfigRegion,
) -> Result<ComplianceReport, ComplianceError> {
    let mut errors = ErrorTree::new();
    if let Some((label, violation)) = run_config_check(subject, policy, region)? {
        warn!("{} config recorded missing lines", region);
        errors.insert(label, violation);
    }

    Ok(ComplianceReport::from_tree(errors))
}

/// Run every check the policy document declares, in declared order
///
/// The `running`/`candidate` keys run as configuration checks; every other
/// key runs as an accessor check.
pub fn evaluate_all(
    subject: &dyn Subject,
    policy: &Mapping,
) -> Result<ComplianceReport, ComplianceError> {
    for key in policy.keys() {
        if key.parse::<ConfigRegion>().is_err() {
            validate_check_name(subject, key)?;
        }
    }

    let mut errors = ErrorTree::new();
    for key in policy.keys() {
        if let Ok(region) = key.parse::<ConfigRegion>() {
            if let Some((label, violation)) = run_config_check(subject, policy, region)? {
                warn!("{} config recorded missing lines", region);
                errors.insert(label, violation);
            }
        } else if let Some(violation) = run_accessor_check(subject, policy, key)? {
            warn!("check '{}' recorded mismatches", key);
            errors.insert(key, violation);
        }
    }

    Ok(ComplianceReport::from_tree(errors))
}

fn validate_check_name(subject: &dyn Subject, name: &str) -> Result<(), ComplianceError> {
    if !name.starts_with(ACCESSOR_PREFIX) {
        return Err(ComplianceError::InvalidAccessorName {
            name: name.to_string(),
        });
    }
    if !subject.has_accessor(name) {
        return Err(ComplianceError::UnknownAccessor {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn run_accessor_check(
    subject: &dyn Subject,
    policy: &Mapping,
    name: &str,
) -> Result<Option<Violation>, ComplianceError> {
    debug!("running check '{}'", name);

    let expected = policy
        .get(name)
        .ok_or_else(|| ComplianceError::MissingPolicyEntry {
            key: name.to_string(),
        })?;
    let actual = subject.invoke(name).map_err(into_compliance_error)?;

    // A bare-sequence result gets both sides wrapped under a synthetic key
    // so the mapping-comparison path is reused uniformly
    if actual.is_sequence() {
        let expected = wrap_not_matched(expected.clone());
        let actual = wrap_not_matched(actual);
        Ok(compare(&expected, &actual))
    } else {
        Ok(compare(expected, &actual))
    }
}

fn run_config_check(
    subject: &dyn Subject,
    policy: &Mapping,
    region: ConfigRegion,
) -> Result<Option<(String, Violation)>, ComplianceError> {
    debug!("running {} config check", region);

    let expected = expected_lines(policy, region)?;
    let actual = subject
        .fetch_config(region)
        .map_err(into_compliance_error)?;

    let missing: Vec<String> = expected
        .into_iter()
        .filter(|line| !actual.iter().any(|actual_line| actual_line == line))
        .collect();

    if missing.is_empty() {
        Ok(None)
    } else {
        Ok(Some((
            format!("Expected but not found in {} config", region),
            Violation::List(missing),
        )))
    }
}

/// Pull the expected line list for a region out of the policy document
fn expected_lines(policy: &Mapping, region: ConfigRegion) -> Result<Vec<String>, ComplianceError> {
    let entry = policy
        .get(region.as_str())
        .ok_or_else(|| ComplianceError::MissingPolicyEntry {
            key: region.as_str().to_string(),
        })?;

    let items = entry.as_sequence().ok_or_else(|| {
        ComplianceError::PolicyShape(nsp_core::ValueError::UnsupportedNode {
            reason: format!(
                "'{}' entry must be a sequence of lines, got a {}",
                region,
                entry.kind()
            ),
        })
    })?;

    items
        .iter()
        .map(|item| {
            item.as_scalar().map(|scalar| scalar.normalized()).ok_or_else(|| {
                ComplianceError::PolicyShape(nsp_core::ValueError::UnsupportedNode {
                    reason: format!(
                        "'{}' entry must contain only scalar lines, got a {}",
                        region,
                        item.kind()
                    ),
                })
            })
        })
        .collect()
}

fn wrap_not_matched(value: Value) -> Value {
    let mut wrapper = Mapping::new();
    wrapper.insert(NOT_MATCHED_KEY, value);
    Value::Mapping(wrapper)
}

fn into_compliance_error(error: AccessorError) -> ComplianceError {
    match error {
        AccessorError::NotImplemented { name } => ComplianceError::AccessorNotImplemented { name },
        AccessorError::Failed { name, reason } => ComplianceError::AccessorFailed { name, reason },
    }
}
