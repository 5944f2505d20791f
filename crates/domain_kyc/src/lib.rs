//! KYC Domain
//!
//! This crate manages the KYC (Know Your Customer) verification data for the
//! two onboarding roles on the platform:
//!
//! - **Investor**: individual identity, address, bank, income profile, selfie
//! - **Builder**: company identity, registered address, documents, bank,
//!   authorized person
//!
//! # Status lifecycle
//!
//! Both roles share a single status vocabulary that is monotonic under the
//! normal flow:
//!
//! ```text
//! not_started -> in_progress -> pending -> approved
//!                                       -> rejected -> in_progress (resubmission)
//! ```
//!
//! Only two writers may decide a status: the submission controller (moves a
//! flow to `pending`, or straight to `approved` in mock mode) and the status
//! reconciler (maps the remote decision onto the local vocabulary). Both live
//! in `domain_onboarding`.
//!
//! # Layers
//!
//! - `format`: keystroke-level normalizers and display-only masks
//! - `validation`: pure per-step validators returning field -> message maps
//! - `form`: the mutable form records owned by the wizard
//! - `ports` / `adapters`: the remote decision service behind a port trait

pub mod adapters;
pub mod error;
pub mod form;
pub mod format;
pub mod ports;
pub mod status;
pub mod validation;

pub use error::KycError;
pub use form::{
    AccountType, AddressFields, AnnualIncomeBand, BankDetails, BuilderKycForm, BusinessType,
    Gender, InvestorKycForm, Occupation, RiskAppetite,
};
pub use format::{
    format_aadhaar_display, mask_aadhaar, mask_account_number, mask_pan, normalize_aadhaar,
    normalize_account_number, normalize_ifsc, normalize_mobile, normalize_pan, normalize_pincode,
    normalize_year,
};
pub use ports::{KycDecision, KycServicePort, SubmitKycRequest, SubmitKycResponse};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockKycServicePort;
pub use status::{KycStatus, RemoteKycStatus};
pub use validation::{
    validate_builder_step, validate_investor_step, BuilderStep, FieldErrors, InvestorStep,
};
pub use adapters::{RemoteKycAdapter, RemoteKycConfig};
