//! KYC domain errors

use core_kernel::PortError;
use thiserror::Error;

use crate::status::KycStatus;

/// Errors that can occur in the KYC domain
#[derive(Debug, Error)]
pub enum KycError {
    /// A status change that the lifecycle rules forbid
    #[error("Invalid KYC status transition: {from} -> {to}")]
    InvalidStatusTransition { from: KycStatus, to: KycStatus },

    /// Form validation failed
    #[error("KYC validation failed: {0}")]
    ValidationFailed(String),

    /// The remote service declined the submission
    #[error("KYC submission rejected: {0}")]
    SubmissionRejected(String),

    /// A port operation failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl KycError {
    /// Creates an InvalidStatusTransition error
    pub fn invalid_transition(from: KycStatus, to: KycStatus) -> Self {
        KycError::InvalidStatusTransition { from, to }
    }

    /// Creates a ValidationFailed error from a field-error summary
    pub fn validation(message: impl Into<String>) -> Self {
        KycError::ValidationFailed(message.into())
    }
}
