//! KYC Service Port
//!
//! The remote KYC decision service is a collaborator the platform consumes
//! over HTTP. This module defines the port trait the onboarding services
//! depend on, so the transport can be swapped between the real REST adapter
//! ([`crate::adapters::RemoteKycAdapter`]) and an in-memory mock for tests.
//!
//! # Contract
//!
//! - `submit_investor_kyc` carries the document payload; `success: true` in
//!   the response is what allows the submission controller to move the local
//!   status to `pending`.
//! - `fetch_decision` returns the remote 3-value vocabulary plus an optional
//!   rejection reason; the status reconciler maps it onto the local enum.
//! - `approve` / `reject` form the admin decision feed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, HealthCheckable, OperationMetadata, PortError, Role, UserId};

use crate::status::RemoteKycStatus;

/// Investor submission payload sent to the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitKycRequest {
    pub document_type: String,
    pub document_number: String,
    pub selfie_image: Option<String>,
}

impl SubmitKycRequest {
    /// Builds the PAN-document submission used by the investor flow
    pub fn pan(document_number: impl Into<String>, selfie_image: Option<String>) -> Self {
        Self {
            document_type: "PAN".to_string(),
            document_number: document_number.into(),
            selfie_image,
        }
    }
}

/// Remote response to a KYC submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitKycResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Remote decision for a user, as fetched from the status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycDecision {
    pub status: RemoteKycStatus,
    pub rejection_reason: Option<String>,
}

impl KycDecision {
    /// A pending decision with no reason attached
    pub fn pending() -> Self {
        Self {
            status: RemoteKycStatus::Pending,
            rejection_reason: None,
        }
    }

    /// A verified decision
    pub fn verified() -> Self {
        Self {
            status: RemoteKycStatus::Verified,
            rejection_reason: None,
        }
    }

    /// A rejected decision carrying a reason
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            status: RemoteKycStatus::Rejected,
            rejection_reason: Some(reason.into()),
        }
    }
}

/// Port trait for the remote KYC decision service
#[async_trait]
pub trait KycServicePort: DomainPort + HealthCheckable {
    /// Submits the investor's KYC payload for verification
    ///
    /// # Arguments
    ///
    /// * `user` - The submitting user
    /// * `request` - Document type/number and selfie payload
    /// * `metadata` - Optional operation metadata for tracing
    ///
    /// # Returns
    ///
    /// The remote acknowledgement; `success: true` is required before the
    /// local status may move to `pending`.
    async fn submit_investor_kyc(
        &self,
        user: UserId,
        request: SubmitKycRequest,
        metadata: Option<OperationMetadata>,
    ) -> Result<SubmitKycResponse, PortError>;

    /// Fetches the current remote decision for a user
    async fn fetch_decision(
        &self,
        user: UserId,
        role: Role,
        metadata: Option<OperationMetadata>,
    ) -> Result<KycDecision, PortError>;

    /// Records an approval decision (admin feed)
    async fn approve(
        &self,
        user: UserId,
        role: Role,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Records a rejection decision with a reason (admin feed)
    async fn reject(
        &self,
        user: UserId,
        role: Role,
        reason: String,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;
}

/// Mock implementation of KycServicePort for testing
///
/// Stores decisions in memory and can be switched offline to exercise
/// soft-fail paths without a network.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of KycServicePort
    #[derive(Debug, Default)]
    pub struct MockKycServicePort {
        decisions: Arc<RwLock<HashMap<(UserId, Role), KycDecision>>>,
        submissions: Arc<RwLock<Vec<(UserId, SubmitKycRequest)>>>,
        offline: AtomicBool,
        reject_submissions: AtomicBool,
    }

    impl MockKycServicePort {
        /// Creates a new mock port with no decisions recorded
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-seeds a decision for a user
        pub async fn with_decision(self, user: UserId, role: Role, decision: KycDecision) -> Self {
            self.decisions.write().await.insert((user, role), decision);
            self
        }

        /// Replaces the stored decision for a user
        pub async fn set_decision(&self, user: UserId, role: Role, decision: KycDecision) {
            self.decisions.write().await.insert((user, role), decision);
        }

        /// Switches the mock offline; every call fails with a transient error
        pub fn set_offline(&self, offline: bool) {
            self.offline.store(offline, Ordering::Relaxed);
        }

        /// Makes submissions come back with `success: false`
        pub fn set_reject_submissions(&self, reject: bool) {
            self.reject_submissions.store(reject, Ordering::Relaxed);
        }

        /// Returns the submissions recorded so far
        pub async fn submissions(&self) -> Vec<(UserId, SubmitKycRequest)> {
            self.submissions.read().await.clone()
        }

        fn check_online(&self) -> Result<(), PortError> {
            if self.offline.load(Ordering::Relaxed) {
                Err(PortError::ServiceUnavailable {
                    service: "mock-kyc-service".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    impl DomainPort for MockKycServicePort {}

    #[async_trait]
    impl HealthCheckable for MockKycServicePort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.offline.load(Ordering::Relaxed) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult {
                adapter_id: "mock-kyc-service".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl KycServicePort for MockKycServicePort {
        async fn submit_investor_kyc(
            &self,
            user: UserId,
            request: SubmitKycRequest,
            _metadata: Option<OperationMetadata>,
        ) -> Result<SubmitKycResponse, PortError> {
            self.check_online()?;
            self.submissions.write().await.push((user, request));

            if self.reject_submissions.load(Ordering::Relaxed) {
                return Ok(SubmitKycResponse {
                    success: false,
                    message: Some("Document verification failed".to_string()),
                });
            }

            self.decisions
                .write()
                .await
                .insert((user, Role::Investor), KycDecision::pending());
            Ok(SubmitKycResponse {
                success: true,
                message: None,
            })
        }

        async fn fetch_decision(
            &self,
            user: UserId,
            role: Role,
            _metadata: Option<OperationMetadata>,
        ) -> Result<KycDecision, PortError> {
            self.check_online()?;
            self.decisions
                .read()
                .await
                .get(&(user, role))
                .cloned()
                .ok_or_else(|| PortError::not_found("KycDecision", user))
        }

        async fn approve(
            &self,
            user: UserId,
            role: Role,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.check_online()?;
            self.decisions
                .write()
                .await
                .insert((user, role), KycDecision::verified());
            Ok(())
        }

        async fn reject(
            &self,
            user: UserId,
            role: Role,
            reason: String,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.check_online()?;
            self.decisions
                .write()
                .await
                .insert((user, role), KycDecision::rejected(reason));
            Ok(())
        }
    }
}
