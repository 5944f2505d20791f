//! KYC onboarding DTOs
//!
//! The wire shape uses camelCase keys, matching what the web client and the
//! remote verification service exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::Role;
use domain_kyc::KycStatus;
use domain_onboarding::{Route, SubmitOutcome, UserKycRecord};

/// Token issuance request (development/testing convenience)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    /// Existing user id; omitted for a fresh user
    pub user_id: Option<Uuid>,
    pub role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub user_id: Uuid,
    pub expires_in_secs: u64,
}

/// A user's KYC standing plus where the client should land
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycStatusResponse {
    pub user_id: Uuid,
    pub role: Role,
    pub kyc_status: KycStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub entry_route: String,
}

impl KycStatusResponse {
    /// Builds the response from a store record, or the not-started default
    pub fn from_record(user_id: Uuid, role: Role, record: Option<UserKycRecord>) -> Self {
        let status = record
            .as_ref()
            .map(|r| r.status)
            .unwrap_or(KycStatus::NotStarted);
        Self {
            user_id,
            role,
            kyc_status: status,
            rejection_reason: record.as_ref().and_then(|r| r.rejection_reason.clone()),
            updated_at: record.as_ref().map(|r| r.updated_at),
            entry_route: route_name(domain_onboarding::resolve_entry_route(status)).to_string(),
        }
    }
}

/// Response to a successful submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitKycResponse {
    pub outcome: String,
    pub kyc_status: KycStatus,
}

impl SubmitKycResponse {
    pub fn new(outcome: &SubmitOutcome, status: KycStatus) -> Self {
        let outcome = match outcome {
            SubmitOutcome::Approved => "approved",
            SubmitOutcome::PendingSubmitted => "pending_submitted",
            SubmitOutcome::PendingLocal => "pending_local",
        };
        Self {
            outcome: outcome.to_string(),
            kyc_status: status,
        }
    }
}

/// Admin approval payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveKycRequest {
    pub role: Role,
}

/// Admin rejection payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectKycRequest {
    pub role: Role,
    pub reason: String,
}

fn route_name(route: Route) -> &'static str {
    match route {
        Route::Wizard => "wizard",
        Route::StatusPage => "status_page",
        Route::Dashboard => "dashboard",
        Route::Login => "login",
    }
}
