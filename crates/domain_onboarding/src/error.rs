//! Onboarding domain errors

use core_kernel::{CoreError, PortError};
use domain_kyc::{FieldErrors, KycError};
use thiserror::Error;

use crate::camera::CameraError;

/// Errors that can occur in the onboarding workflow
#[derive(Debug, Error)]
pub enum OnboardingError {
    /// Submission attempted without accepting the declaration
    #[error("Declaration must be accepted before submitting")]
    DeclarationNotAccepted,

    /// The remote service declined or failed the submission; the persisted
    /// status is unchanged and the user may retry from the review step
    #[error("KYC submission failed: {0}")]
    SubmissionFailed(String),

    /// Resubmission requested from a status other than rejected
    #[error("Resubmission is only available after a rejection (current: {0})")]
    ResubmitNotAvailable(domain_kyc::KycStatus),

    /// A KYC domain rule was violated
    #[error(transparent)]
    Kyc(#[from] KycError),

    /// A kernel-level rule was violated (status transitions, configuration)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A port operation failed
    #[error(transparent)]
    Port(#[from] PortError),

    /// The selfie capture device failed
    #[error(transparent)]
    Camera(#[from] CameraError),
}

impl OnboardingError {
    /// Renders this error as field-level errors for the review step, where
    /// the declaration gate and submission failures are surfaced inline
    pub fn as_field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match self {
            OnboardingError::DeclarationNotAccepted => {
                errors.add(
                    "declaration_accepted",
                    "You must accept the declaration to submit",
                );
            }
            other => {
                errors.add("submit", other.to_string());
            }
        }
        errors
    }
}
