//! KYC onboarding handlers
//!
//! All routes here operate on the authenticated user taken from the JWT
//! claims; users can only see and submit their own KYC.

use axum::{Extension, Json};
use axum::extract::State;

use core_kernel::Role;
use domain_kyc::{BuilderKycForm, InvestorKycForm};
use domain_onboarding::OnboardingError;

use crate::auth::{require_role, Claims};
use crate::dto::kyc::{KycStatusResponse, SubmitKycResponse};
use crate::error::ApiError;
use crate::AppState;

/// Submits the investor KYC form for the authenticated user
pub async fn submit_investor(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<InvestorKycForm>,
) -> Result<Json<SubmitKycResponse>, ApiError> {
    require_role(&claims, &[Role::Investor]).map_err(|_| forbidden(&claims))?;
    let user = claims.user_id().map_err(|_| ApiError::Unauthorized)?;

    let outcome = state
        .controller
        .submit_investor(user, &form)
        .await
        .map_err(map_submission_error)?;

    let status = state.store.status_of(user).await;
    Ok(Json(SubmitKycResponse::new(&outcome, status)))
}

/// Submits the builder KYC form for the authenticated user
pub async fn submit_builder(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<BuilderKycForm>,
) -> Result<Json<SubmitKycResponse>, ApiError> {
    require_role(&claims, &[Role::Builder]).map_err(|_| forbidden(&claims))?;
    let user = claims.user_id().map_err(|_| ApiError::Unauthorized)?;

    let outcome = state
        .controller
        .submit_builder(user, &form)
        .await
        .map_err(map_submission_error)?;

    let status = state.store.status_of(user).await;
    Ok(Json(SubmitKycResponse::new(&outcome, status)))
}

/// Returns the authenticated user's KYC standing and entry route
pub async fn get_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<KycStatusResponse>, ApiError> {
    let user = claims.user_id().map_err(|_| ApiError::Unauthorized)?;
    let record = state.store.get(user).await;
    Ok(Json(KycStatusResponse::from_record(
        *user.as_uuid(),
        claims.role,
        record,
    )))
}

/// Pulls the remote decision and folds it into the local status
///
/// Fetch failures are soft: the response then simply carries the last known
/// local status.
pub async fn refresh_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<KycStatusResponse>, ApiError> {
    require_role(&claims, &[Role::Investor, Role::Builder]).map_err(|_| forbidden(&claims))?;
    let user = claims.user_id().map_err(|_| ApiError::Unauthorized)?;

    state.reconciler.reconcile(user, claims.role).await;

    let record = state.store.get(user).await;
    Ok(Json(KycStatusResponse::from_record(
        *user.as_uuid(),
        claims.role,
        record,
    )))
}

/// Re-opens the wizard after a rejection
pub async fn resubmit(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<KycStatusResponse>, ApiError> {
    require_role(&claims, &[Role::Investor, Role::Builder]).map_err(|_| forbidden(&claims))?;
    let user = claims.user_id().map_err(|_| ApiError::Unauthorized)?;

    state.reconciler.resubmit(user, claims.role).await?;

    let record = state.store.get(user).await;
    Ok(Json(KycStatusResponse::from_record(
        *user.as_uuid(),
        claims.role,
        record,
    )))
}

fn forbidden(claims: &Claims) -> ApiError {
    ApiError::Forbidden(format!("Role {} cannot access this route", claims.role))
}

/// Declaration and field failures surface as 422 with the field map intact
fn map_submission_error(error: OnboardingError) -> ApiError {
    match &error {
        OnboardingError::DeclarationNotAccepted | OnboardingError::Kyc(_) => {
            ApiError::Validation(error.as_field_errors())
        }
        _ => error.into(),
    }
}
