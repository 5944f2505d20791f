//! API error handling

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::{CoreError, PortError};
use domain_kyc::FieldErrors;
use domain_onboarding::OnboardingError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Validation failed")]
    Validation(FieldErrors),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Field-keyed validation messages, present for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, field_errors) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
                None,
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone(), None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
                None,
            ),
            ApiError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                msg.clone(),
                None,
            ),
            ApiError::Validation(errors) => {
                let map = errors
                    .iter()
                    .map(|(field, message)| (field.to_string(), message.to_string()))
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "validation_error",
                    "One or more fields failed validation".to_string(),
                    Some(map),
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            field_errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else if err.is_transient() {
            ApiError::Upstream(err.to_string())
        } else {
            match err {
                PortError::Validation { message, .. } => {
                    ApiError::BadRequest(message)
                }
                PortError::Rejected { message } => ApiError::Upstream(message),
                PortError::Unauthorized { .. } => ApiError::Unauthorized,
                other => ApiError::Internal(other.to_string()),
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidStateTransition(msg) => ApiError::Conflict(msg),
            CoreError::NotFound(msg) => ApiError::NotFound(msg),
            CoreError::Validation(msg) => ApiError::BadRequest(msg),
            CoreError::Configuration(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<OnboardingError> for ApiError {
    fn from(err: OnboardingError) -> Self {
        match err {
            OnboardingError::DeclarationNotAccepted => {
                ApiError::Validation(err.as_field_errors())
            }
            OnboardingError::SubmissionFailed(msg) => ApiError::Upstream(msg),
            OnboardingError::ResubmitNotAvailable(_) => ApiError::Conflict(err.to_string()),
            OnboardingError::Kyc(domain_kyc::KycError::ValidationFailed(msg)) => {
                ApiError::BadRequest(msg)
            }
            OnboardingError::Kyc(inner) => ApiError::Internal(inner.to_string()),
            OnboardingError::Core(inner) => inner.into(),
            OnboardingError::Port(inner) => inner.into(),
            OnboardingError::Camera(inner) => ApiError::BadRequest(inner.to_string()),
        }
    }
}
