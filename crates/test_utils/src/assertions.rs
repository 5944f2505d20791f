//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use domain_kyc::{FieldErrors, KycStatus};

/// Asserts that a validator flagged exactly the given fields
///
/// # Panics
///
/// Panics with the full error map when the flagged field set differs
pub fn assert_fields_flagged(errors: &FieldErrors, expected: &[&str]) {
    let mut flagged: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
    flagged.sort_unstable();
    let mut expected: Vec<&str> = expected.to_vec();
    expected.sort_unstable();
    assert_eq!(
        flagged, expected,
        "Flagged fields differ. Full errors: {}",
        errors.summary()
    );
}

/// Asserts that a validator produced no errors
pub fn assert_step_clean(errors: &FieldErrors) {
    assert!(
        errors.is_empty(),
        "Expected a clean step, got: {}",
        errors.summary()
    );
}

/// Asserts that a field carries a specific message
pub fn assert_field_message(errors: &FieldErrors, field: &str, expected: &str) {
    match errors.get(field) {
        Some(message) => assert_eq!(
            message, expected,
            "Unexpected message for field '{field}'"
        ),
        None => panic!(
            "Field '{field}' was not flagged. Full errors: {}",
            errors.summary()
        ),
    }
}

/// Asserts that a status move is permitted by the lifecycle rules
pub fn assert_transition_allowed(from: KycStatus, to: KycStatus) {
    assert!(
        from.can_transition_to(to),
        "Expected {from} -> {to} to be allowed"
    );
}

/// Asserts that a status move is forbidden by the lifecycle rules
pub fn assert_transition_forbidden(from: KycStatus, to: KycStatus) {
    assert!(
        !from.can_transition_to(to),
        "Expected {from} -> {to} to be forbidden"
    );
}
