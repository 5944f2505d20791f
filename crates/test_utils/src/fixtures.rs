//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the KYC onboarding flows. These
//! fixtures are designed to be consistent and predictable for unit tests.

use core_kernel::UserId;
use uuid::Uuid;

/// Fixture for identity document test data
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// A well-formed personal PAN
    pub fn pan() -> &'static str {
        "ABCDE1234F"
    }

    /// A well-formed company PAN
    pub fn company_pan() -> &'static str {
        "AAACS1234L"
    }

    /// A well-formed 12-digit Aadhaar number
    pub fn aadhaar() -> &'static str {
        "123456789012"
    }

    /// A well-formed IFSC code
    pub fn ifsc() -> &'static str {
        "HDFC0001234"
    }

    /// A 10-digit Indian mobile number
    pub fn mobile() -> &'static str {
        "9876543210"
    }

    /// A 6-digit pincode
    pub fn pincode() -> &'static str {
        "560001"
    }

    /// A RERA registration number
    pub fn rera_number() -> &'static str {
        "PRM/KA/RERA/1251/446"
    }

    /// A tiny data-URL image payload standing in for a captured selfie
    pub fn selfie_data_url() -> &'static str {
        "data:image/png;base64,iVBORw0KGgo="
    }
}

/// Fixture for user identities
pub struct IdFixtures;

impl IdFixtures {
    /// A deterministic user id for tests that assert on identity
    pub fn fixed_user() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x00c0_ffee_0000_0000_0000_0000_0000_0001))
    }

    /// A fresh random user id
    pub fn user() -> UserId {
        UserId::new()
    }
}
