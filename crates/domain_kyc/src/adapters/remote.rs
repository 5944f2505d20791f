//! Remote KYC Service Adapter
//!
//! Implements [`KycServicePort`] against the remote decision service's REST
//! API. The adapter owns a pooled `reqwest` client and handles:
//!
//! - request timeouts on every call
//! - automatic retry for transient failures
//! - a circuit breaker that sheds load while the remote is down
//!
//! # Error mapping
//!
//! HTTP failures are mapped onto `PortError`:
//! - 404 -> `NotFound`
//! - 401/403 -> `Unauthorized`
//! - 5xx -> `ServiceUnavailable`
//! - client timeout -> `Timeout`
//! - anything else non-2xx -> `Internal`

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use core_kernel::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError, Role, UserId,
};

use crate::ports::{KycDecision, KycServicePort, SubmitKycRequest, SubmitKycResponse};
use crate::status::RemoteKycStatus;

/// Configuration for the remote KYC adapter
#[derive(Debug, Clone)]
pub struct RemoteKycConfig {
    /// Base URL of the decision service (e.g. "https://kyc.example.com")
    pub base_url: String,
    /// Optional bearer token for authentication
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retry attempts for transient failures
    pub retry_attempts: u32,
    /// Circuit breaker configuration
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for RemoteKycConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            timeout_secs: 30,
            retry_attempts: 3,
            circuit_breaker: Some(CircuitBreakerConfig::default()),
        }
    }
}

/// Circuit breaker state for fault tolerance
#[derive(Debug)]
struct CircuitBreaker {
    config: CircuitBreakerConfig,
    failure_count: AtomicU64,
    success_count: AtomicU64,
    is_open: AtomicBool,
    last_failure_time: RwLock<Option<Instant>>,
}

impl CircuitBreaker {
    fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            failure_count: AtomicU64::new(0),
            success_count: AtomicU64::new(0),
            is_open: AtomicBool::new(false),
            last_failure_time: RwLock::new(None),
        }
    }

    async fn is_available(&self) -> bool {
        if !self.is_open.load(Ordering::Relaxed) {
            return true;
        }

        // Half-open after the reset timeout: let one request probe the remote
        let last_failure = self.last_failure_time.read().await;
        if let Some(time) = *last_failure {
            if time.elapsed() > Duration::from_secs(self.config.reset_timeout_secs) {
                return true;
            }
        }

        false
    }

    fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
        let success = self.success_count.fetch_add(1, Ordering::Relaxed) + 1;
        if success >= self.config.success_threshold as u64 {
            self.is_open.store(false, Ordering::Relaxed);
            self.success_count.store(0, Ordering::Relaxed);
        }
    }

    async fn record_failure(&self) {
        self.success_count.store(0, Ordering::Relaxed);
        let failures = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        if failures >= self.config.failure_threshold as u64 {
            self.is_open.store(true, Ordering::Relaxed);
            *self.last_failure_time.write().await = Some(Instant::now());
        }
    }
}

/// Wire shape of the remote status endpoint
///
/// `kycStatus` arrives as a raw string so an unknown vocabulary value maps to
/// a transformation error instead of a deserialization panic; the reconciler
/// treats any fetch error as "leave the persisted status alone".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusWireResponse {
    success: bool,
    kyc_status: Option<String>,
    rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct DecisionWireRequest<'a> {
    decision: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

/// REST adapter for the remote KYC decision service
#[derive(Debug)]
pub struct RemoteKycAdapter {
    config: RemoteKycConfig,
    client: reqwest::Client,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
}

impl RemoteKycAdapter {
    /// Creates a new adapter with the given configuration
    pub fn new(config: RemoteKycConfig) -> Result<Self, PortError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortError::Internal {
                message: "Failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        let circuit_breaker = config
            .circuit_breaker
            .clone()
            .map(|cb| Arc::new(CircuitBreaker::new(cb)));

        Ok(Self {
            config,
            client,
            circuit_breaker,
        })
    }

    /// Returns the base URL of the remote service
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Checks if the circuit breaker is open (shedding requests)
    pub async fn is_circuit_open(&self) -> bool {
        if let Some(ref cb) = self.circuit_breaker {
            !cb.is_available().await
        } else {
            false
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn map_send_error(&self, operation: &str, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.config.timeout_secs * 1000,
            }
        } else {
            PortError::Connection {
                message: format!("Request to KYC service failed: {operation}"),
                source: Some(Box::new(error)),
            }
        }
    }

    fn map_status_error(status: reqwest::StatusCode, path: &str) -> PortError {
        match status.as_u16() {
            404 => PortError::not_found("KycResource", path),
            401 | 403 => PortError::Unauthorized {
                message: format!("KYC service refused {path}"),
            },
            500..=599 => PortError::ServiceUnavailable {
                service: "kyc-decision".to_string(),
            },
            other => PortError::internal(format!("Unexpected status {other} from {path}")),
        }
    }

    /// Sends one request attempt and decodes the JSON body
    async fn send_once<T: for<'de> Deserialize<'de>>(
        &self,
        operation: &str,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, PortError> {
        let response = self
            .apply_auth(builder)
            .send()
            .await
            .map_err(|e| self.map_send_error(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status_error(status, path));
        }

        response.json::<T>().await.map_err(|e| PortError::Internal {
            message: format!("Failed to decode response from {path}"),
            source: Some(Box::new(e)),
        })
    }

    /// Runs a request through the circuit breaker with transient-retry
    async fn request<T, F>(&self, operation: &str, path: &str, make: F) -> Result<T, PortError>
    where
        T: for<'de> Deserialize<'de>,
        F: Fn() -> reqwest::RequestBuilder,
    {
        if let Some(ref cb) = self.circuit_breaker {
            if !cb.is_available().await {
                return Err(PortError::ServiceUnavailable {
                    service: "kyc-decision (circuit open)".to_string(),
                });
            }
        }

        let mut attempt = 0u32;
        loop {
            match self.send_once(operation, path, make()).await {
                Ok(value) => {
                    if let Some(ref cb) = self.circuit_breaker {
                        cb.record_success();
                    }
                    return Ok(value);
                }
                Err(error) if error.is_transient() && attempt < self.config.retry_attempts => {
                    attempt += 1;
                    let backoff = Duration::from_millis(100 * 2u64.pow(attempt.min(6)));
                    tracing::warn!(
                        operation,
                        attempt,
                        error = %error,
                        "Transient KYC service failure, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(error) => {
                    if error.is_transient() {
                        if let Some(ref cb) = self.circuit_breaker {
                            cb.record_failure().await;
                        }
                    }
                    return Err(error);
                }
            }
        }
    }

    fn parse_remote_status(raw: &str) -> Result<RemoteKycStatus, PortError> {
        match raw {
            "VERIFIED" => Ok(RemoteKycStatus::Verified),
            "REJECTED" => Ok(RemoteKycStatus::Rejected),
            "PENDING" => Ok(RemoteKycStatus::Pending),
            other => Err(PortError::Transformation {
                message: format!("Unknown remote KYC status: {other}"),
            }),
        }
    }

    fn status_path(role: Role) -> Result<&'static str, PortError> {
        match role {
            Role::Investor => Ok("api/investor/kyc/status"),
            Role::Builder => Ok("api/builder/kyc/status"),
            Role::Admin => Err(PortError::validation("Admins have no KYC status")),
        }
    }

    fn decision_path(role: Role) -> Result<&'static str, PortError> {
        match role {
            Role::Investor => Ok("api/investor/kyc/decision"),
            Role::Builder => Ok("api/builder/kyc/decision"),
            Role::Admin => Err(PortError::validation("Admins have no KYC decision")),
        }
    }
}

impl DomainPort for RemoteKycAdapter {}

#[async_trait]
impl HealthCheckable for RemoteKycAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        if self.is_circuit_open().await {
            return HealthCheckResult {
                adapter_id: "remote-kyc-adapter".to_string(),
                status: AdapterHealth::Degraded,
                latency_ms: 0,
                message: Some("Circuit breaker is open".to_string()),
                checked_at: Utc::now(),
            };
        }

        let url = self.url("health");
        let result = self.apply_auth(self.client.get(&url)).send().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(response) if response.status().is_success() => (AdapterHealth::Healthy, None),
            Ok(response) => (
                AdapterHealth::Degraded,
                Some(format!("Health endpoint returned {}", response.status())),
            ),
            Err(e) => (AdapterHealth::Unhealthy, Some(e.to_string())),
        };

        HealthCheckResult {
            adapter_id: "remote-kyc-adapter".to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl KycServicePort for RemoteKycAdapter {
    async fn submit_investor_kyc(
        &self,
        user: UserId,
        request: SubmitKycRequest,
        metadata: Option<OperationMetadata>,
    ) -> Result<SubmitKycResponse, PortError> {
        let path = "api/investor/kyc";
        let url = self.url(path);
        let correlation = metadata.and_then(|m| m.correlation_id);

        tracing::info!(
            user = %user,
            document_type = %request.document_type,
            correlation = ?correlation,
            "Submitting investor KYC"
        );

        let response: SubmitKycResponse = self
            .request("submit_investor_kyc", path, || {
                self.client
                    .post(&url)
                    .header("X-User-Id", user.to_string())
                    .json(&request)
            })
            .await?;

        Ok(response)
    }

    async fn fetch_decision(
        &self,
        user: UserId,
        role: Role,
        _metadata: Option<OperationMetadata>,
    ) -> Result<KycDecision, PortError> {
        let path = Self::status_path(role)?;
        let url = self.url(path);

        let wire: StatusWireResponse = self
            .request("fetch_decision", path, || {
                self.client.get(&url).header("X-User-Id", user.to_string())
            })
            .await?;

        if !wire.success {
            return Err(PortError::rejected("Status fetch unsuccessful"));
        }

        let raw = wire.kyc_status.ok_or_else(|| PortError::Transformation {
            message: "Status response missing kycStatus".to_string(),
        })?;
        let status = Self::parse_remote_status(&raw)?;

        Ok(KycDecision {
            status,
            rejection_reason: wire.rejection_reason,
        })
    }

    async fn approve(
        &self,
        user: UserId,
        role: Role,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        let path = Self::decision_path(role)?;
        let url = self.url(path);
        let body = DecisionWireRequest {
            decision: "approve",
            reason: None,
        };

        let _: serde_json::Value = self
            .request("approve", path, || {
                self.client
                    .post(&url)
                    .header("X-User-Id", user.to_string())
                    .json(&body)
            })
            .await?;
        Ok(())
    }

    async fn reject(
        &self,
        user: UserId,
        role: Role,
        reason: String,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        let path = Self::decision_path(role)?;
        let url = self.url(path);
        let body = DecisionWireRequest {
            decision: "reject",
            reason: Some(&reason),
        };

        let _: serde_json::Value = self
            .request("reject", path, || {
                self.client
                    .post(&url)
                    .header("X-User-Id", user.to_string())
                    .json(&body)
            })
            .await?;
        Ok(())
    }
}
