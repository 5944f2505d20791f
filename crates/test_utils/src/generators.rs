//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use domain_kyc::KycStatus;
use proptest::prelude::*;

/// Strategy for generating well-formed PAN values (AAAAA9999A)
pub fn pan_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{5}[0-9]{4}[A-Z]"
}

/// Strategy for generating well-formed IFSC codes (AAAA0XXXXXX)
pub fn ifsc_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{4}0[A-Z0-9]{6}"
}

/// Strategy for generating 12-digit Aadhaar numbers
pub fn aadhaar_strategy() -> impl Strategy<Value = String> {
    "[0-9]{12}"
}

/// Strategy for generating 10-digit mobile numbers
pub fn mobile_strategy() -> impl Strategy<Value = String> {
    "[6-9][0-9]{9}"
}

/// Strategy for generating 6-digit pincodes
pub fn pincode_strategy() -> impl Strategy<Value = String> {
    "[1-9][0-9]{5}"
}

/// Strategy for generating bank account numbers (9 to 18 digits)
pub fn account_number_strategy() -> impl Strategy<Value = String> {
    "[0-9]{9,18}"
}

/// Strategy for generating raw user input around a clean value: mixed case
/// plus common separators that the field normalizers must strip
pub fn noisy_input_strategy(clean: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
    (clean, prop::sample::select(vec!["", " ", "-", "  "])).prop_map(|(value, sep)| {
        value
            .chars()
            .flat_map(|c| {
                c.to_lowercase()
                    .chain(sep.chars())
                    .collect::<Vec<_>>()
            })
            .collect()
    })
}

/// Strategy for generating any KYC status
pub fn kyc_status_strategy() -> impl Strategy<Value = KycStatus> {
    prop_oneof![
        Just(KycStatus::NotStarted),
        Just(KycStatus::InProgress),
        Just(KycStatus::Pending),
        Just(KycStatus::Approved),
        Just(KycStatus::Rejected),
    ]
}
