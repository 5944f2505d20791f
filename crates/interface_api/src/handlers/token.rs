//! Token issuance handler
//!
//! Development and test convenience endpoint; production deployments put a
//! real identity provider in front and disable this route.

use axum::extract::State;
use axum::Json;

use core_kernel::UserId;

use crate::auth::create_token;
use crate::dto::kyc::{TokenRequest, TokenResponse};
use crate::error::ApiError;
use crate::AppState;

/// Issues a JWT for the given (or a fresh) user id
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = request
        .user_id
        .map(UserId::from_uuid)
        .unwrap_or_else(UserId::new);

    let token = create_token(
        user,
        request.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(TokenResponse {
        token,
        user_id: *user.as_uuid(),
        expires_in_secs: state.config.jwt_expiration_secs,
    }))
}
