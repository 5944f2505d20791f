//! Admin decision handlers
//!
//! Approvals and rejections are recorded against the remote decision feed
//! and immediately reconciled into the local store, so the affected user's
//! next status read reflects the decision.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use core_kernel::{Role, UserId};

use crate::auth::{require_role, Claims};
use crate::dto::kyc::{ApproveKycRequest, KycStatusResponse, RejectKycRequest};
use crate::error::ApiError;
use crate::AppState;

/// Approves a user's KYC submission
pub async fn approve_kyc(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<ApproveKycRequest>,
) -> Result<Json<KycStatusResponse>, ApiError> {
    require_admin(&claims)?;
    let user = UserId::from_uuid(user_id);

    state.kyc.approve(user, request.role, None).await?;
    state.reconciler.reconcile(user, request.role).await;

    let record = state.store.get(user).await;
    Ok(Json(KycStatusResponse::from_record(
        user_id,
        request.role,
        record,
    )))
}

/// Rejects a user's KYC submission with a reason
pub async fn reject_kyc(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<RejectKycRequest>,
) -> Result<Json<KycStatusResponse>, ApiError> {
    require_admin(&claims)?;
    if request.reason.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "A rejection reason is required".to_string(),
        ));
    }
    let user = UserId::from_uuid(user_id);

    state
        .kyc
        .reject(user, request.role, request.reason.clone(), None)
        .await?;
    state.reconciler.reconcile(user, request.role).await;

    let record = state.store.get(user).await;
    Ok(Json(KycStatusResponse::from_record(
        user_id,
        request.role,
        record,
    )))
}

fn require_admin(claims: &Claims) -> Result<(), ApiError> {
    require_role(claims, &[Role::Admin])
        .map_err(|_| ApiError::Forbidden("Admin role required".to_string()))
}
