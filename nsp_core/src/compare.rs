//! # Structural Comparator
//!
//! Pure recursive diff between an expected value tree and an actual value
//! tree. The defining semantic is asymmetric: every key and element present
//! in expected must be satisfied by actual, while extra observed data is
//! never an error ("expected is a structural subset of actual", at every
//! nesting level).
//!
//! Dispatch is an exhaustive match on the expected value's kind; the actual
//! value's kind is validated against it. Mismatches come back as data
//! (a [`Violation`] branch), never as errors: a mismatch is an expected,
//! recoverable outcome of a compliance run.

use crate::report::{ErrorTree, Violation};
use crate::types::{Mapping, Scalar, Value};

/// Message attached when an expected key is absent from the actual tree
pub const MISSING_KEY: &str = "Expected key but not found.";

/// Compare an expected tree against an actual tree.
///
/// Returns `None` when actual satisfies expected, otherwise the violation
/// branch describing every mismatch. Inputs are never mutated.
///
/// Duplicate entries in an expected sequence each match independently, so a
/// single actual element may satisfy several duplicates. That relaxation is
/// intentional and kept for compatibility with existing policy documents.
pub fn compare(expected: &Value, actual: &Value) -> Option<Violation> {
    match (expected, actual) {
        (Value::Mapping(expected), Value::Mapping(actual)) => compare_mappings(expected, actual),
        (Value::Sequence(expected), Value::Sequence(actual)) => {
            compare_sequences(expected, actual)
        }
        (Value::Scalar(expected), Value::Scalar(actual)) => compare_scalars(expected, actual),
        // Kind disagreement is a total mismatch at this path
        _ => Some(total_mismatch(expected, actual)),
    }
}

/// Per-key recursive rule, iterating in the expected mapping's declared
/// order. Keys present only in actual are ignored.
fn compare_mappings(expected: &Mapping, actual: &Mapping) -> Option<Violation> {
    let mut tree = ErrorTree::new();

    for (key, expected_value) in expected.iter() {
        match actual.get(key) {
            // Absent key and explicit null both count as missing
            None => tree.insert(key, Violation::Message(MISSING_KEY.to_string())),
            Some(actual_value) if actual_value.is_null() => {
                tree.insert(key, Violation::Message(MISSING_KEY.to_string()));
            }
            Some(actual_value) => {
                if let Some(violation) = compare(expected_value, actual_value) {
                    tree.insert(key, violation);
                }
            }
        }
    }

    if tree.is_empty() {
        None
    } else {
        Some(Violation::Nested(tree))
    }
}

/// Order-free subset rule: every expected element must find some match in
/// actual. Mapping elements match structurally (every expected pair
/// satisfied, extras ignored); everything else matches by membership.
fn compare_sequences(expected: &[Value], actual: &[Value]) -> Option<Violation> {
    let mut not_matched = Vec::new();

    for element in expected {
        let found = match element {
            Value::Mapping(expected_entry) => actual.iter().any(|candidate| {
                matches!(candidate, Value::Mapping(actual_entry)
                    if mapping_subsumes(expected_entry, actual_entry))
            }),
            Value::Scalar(expected_entry) => actual.iter().any(|candidate| {
                matches!(candidate, Value::Scalar(actual_entry)
                    if scalars_equal(expected_entry, actual_entry))
            }),
            Value::Sequence(_) => actual.contains(element),
        };

        if !found {
            not_matched.push(format!("Expected but not found: {}", element));
        }
    }

    if not_matched.is_empty() {
        None
    } else {
        Some(Violation::List(not_matched))
    }
}

/// An actual mapping satisfies an expected one when every expected pair is
/// present and matches recursively
fn mapping_subsumes(expected: &Mapping, actual: &Mapping) -> bool {
    expected.iter().all(|(key, expected_value)| {
        actual
            .get(key)
            .is_some_and(|actual_value| compare(expected_value, actual_value).is_none())
    })
}

fn scalars_equal(expected: &Scalar, actual: &Scalar) -> bool {
    expected.normalized() == actual.normalized()
}

fn compare_scalars(expected: &Scalar, actual: &Scalar) -> Option<Violation> {
    if scalars_equal(expected, actual) {
        None
    } else {
        Some(Violation::Message(format!(
            "Expected '{}', found '{}' instead",
            expected, actual
        )))
    }
}

/// Kind disagreement between expected and actual: report both renderings
fn total_mismatch(expected: &Value, actual: &Value) -> Violation {
    Violation::Message(format!(
        "Expected '{}', found '{}' instead",
        expected, actual
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn value(raw: serde_json::Value) -> Value {
        Value::try_from(raw).unwrap()
    }

    #[test]
    fn test_identical_scalars_match() {
        assert_eq!(compare(&Value::str("up"), &Value::str("up")), None);
        assert_eq!(compare(&Value::int(65000), &Value::int(65000)), None);
        assert_eq!(compare(&Value::bool(true), &Value::bool(true)), None);
    }

    #[test]
    fn test_idempotence_at_depth() {
        let tree = value(serde_json::json!({
            "default": {
                "router_id": "192.0.2.2",
                "peers": {"192.0.2.3": {"is_enabled": false, "uptime": 4294967}},
                "vrfs": ["mgmt", "prod"],
            }
        }));
        assert_eq!(compare(&tree, &tree.clone()), None);
    }

    #[test]
    fn test_scalar_coercion() {
        // 42 and "42" normalize equal by design
        assert_eq!(compare(&Value::int(42), &Value::str("42")), None);
        assert_eq!(compare(&Value::str("42"), &Value::int(42)), None);

        let violation = compare(&Value::int(42), &Value::str("43")).unwrap();
        assert_eq!(
            violation,
            Violation::Message("Expected '42', found '43' instead".to_string())
        );
    }

    #[test]
    fn test_missing_key_is_named_exactly() {
        let expected = value(serde_json::json!({"is_up": true, "is_enabled": true}));
        let actual = value(serde_json::json!({"is_up": true}));

        let violation = compare(&expected, &actual).unwrap();
        let Violation::Nested(tree) = violation else {
            panic!("expected nested violation");
        };
        assert_eq!(tree.len(), 1);
        assert_eq!(
            tree.get("is_enabled"),
            Some(&Violation::Message(MISSING_KEY.to_string()))
        );
    }

    #[test]
    fn test_extra_actual_keys_are_ignored() {
        let expected = value(serde_json::json!({"is_up": true}));
        let actual = value(serde_json::json!({
            "is_up": true,
            "is_enabled": false,
            "description": "uplink",
        }));
        assert_eq!(compare(&expected, &actual), None);
    }

    #[test]
    fn test_null_actual_counts_as_missing() {
        let expected = value(serde_json::json!({"router_id": "192.0.2.1"}));
        let actual = value(serde_json::json!({"router_id": null}));

        let Violation::Nested(tree) = compare(&expected, &actual).unwrap() else {
            panic!("expected nested violation");
        };
        assert_eq!(
            tree.get("router_id"),
            Some(&Violation::Message(MISSING_KEY.to_string()))
        );
    }

    #[test]
    fn test_nested_mismatch_is_path_addressable() {
        let expected = value(serde_json::json!({
            "default": {"router_id": "192.0.2.2"}
        }));
        let actual = value(serde_json::json!({
            "default": {"router_id": "192.0.2.1"}
        }));

        let report = serde_json::to_value(compare(&expected, &actual).unwrap()).unwrap();
        assert_eq!(
            report,
            serde_json::json!({
                "default": {"router_id": "Expected '192.0.2.2', found '192.0.2.1' instead"}
            })
        );
    }

    #[test]
    fn test_kind_disagreement_is_a_total_mismatch() {
        let expected = value(serde_json::json!({"peers": {"192.0.2.3": {}}}));
        let actual = value(serde_json::json!({"peers": "none"}));

        let Violation::Nested(tree) = compare(&expected, &actual).unwrap() else {
            panic!("expected nested violation");
        };
        assert_eq!(
            tree.get("peers"),
            Some(&Violation::Message(
                "Expected '{192.0.2.3: {}}', found 'none' instead".to_string()
            ))
        );
    }

    #[test]
    fn test_sequence_subset_matching() {
        let expected = value(serde_json::json!([{"ip": "192.0.2.3"}]));
        let actual = value(serde_json::json!([{"ip": "192.0.2.1"}, {"ip": "192.0.2.2"}]));

        let violation = compare(&expected, &actual).unwrap();
        assert_eq!(
            violation,
            Violation::List(vec![
                "Expected but not found: {ip: 192.0.2.3}".to_string()
            ])
        );
    }

    #[test]
    fn test_sequence_entry_with_extra_fields_matches() {
        let expected = value(serde_json::json!([{"ip": "192.0.2.3"}]));
        let actual = value(serde_json::json!([
            {"ip": "192.0.2.3", "interface": "Ethernet3/1", "age": 12}
        ]));
        assert_eq!(compare(&expected, &actual), None);
    }

    #[test]
    fn test_sequence_scalar_membership() {
        let expected = value(serde_json::json!(["mgmt", "prod"]));
        let actual = value(serde_json::json!(["prod", "lab", "mgmt"]));
        assert_eq!(compare(&expected, &actual), None);

        let expected = value(serde_json::json!(["mgmt", "dmz"]));
        let violation = compare(&expected, &actual).unwrap();
        assert_eq!(
            violation,
            Violation::List(vec!["Expected but not found: dmz".to_string()])
        );
    }

    #[test]
    fn test_sequence_scalar_membership_coerces() {
        let expected = value(serde_json::json!([100]));
        let actual = value(serde_json::json!(["100", "200"]));
        assert_eq!(compare(&expected, &actual), None);
    }

    #[test]
    fn test_duplicate_expected_entries_may_share_a_match() {
        let expected = value(serde_json::json!([{"vlan": 100}, {"vlan": 100}]));
        let actual = value(serde_json::json!([{"vlan": 100}]));
        assert_eq!(compare(&expected, &actual), None);
    }

    #[test]
    fn test_sequence_mismatches_reported_in_expected_order() {
        let expected = value(serde_json::json!(["zz", "aa"]));
        let actual = value(serde_json::json!(["bb"]));

        let violation = compare(&expected, &actual).unwrap();
        assert_eq!(
            violation,
            Violation::List(vec![
                "Expected but not found: zz".to_string(),
                "Expected but not found: aa".to_string(),
            ])
        );
    }

    #[test]
    fn test_sequence_element_with_nested_mismatch_is_not_found() {
        let expected = value(serde_json::json!([
            {"peer": {"asn": 65001}}
        ]));
        let actual = value(serde_json::json!([
            {"peer": {"asn": 65002}}
        ]));

        let violation = compare(&expected, &actual).unwrap();
        assert_eq!(
            violation,
            Violation::List(vec![
                "Expected but not found: {peer: {asn: 65001}}".to_string()
            ])
        );
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let expected = value(serde_json::json!({"a": [1, 2], "b": {"c": 3}}));
        let actual = value(serde_json::json!({"b": {"c": 4}}));
        let expected_copy = expected.clone();
        let actual_copy = actual.clone();

        let _ = compare(&expected, &actual);
        assert_eq!(expected, expected_copy);
        assert_eq!(actual, actual_copy);
    }
}
