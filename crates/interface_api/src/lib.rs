//! HTTP API Layer
//!
//! This crate provides the REST API for the KYC onboarding system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: KYC submission, status, admin decisions, health
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses with field-level detail
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(kyc, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_kyc::KycServicePort;
use domain_onboarding::{KycStatusStore, StatusReconciler, SubmissionController};

use crate::config::ApiConfig;
use crate::handlers::{admin, health, kyc, token};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub kyc: Arc<dyn KycServicePort>,
    pub store: Arc<KycStatusStore>,
    pub controller: Arc<SubmissionController>,
    pub reconciler: Arc<StatusReconciler>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the onboarding services over a KYC service port
    pub fn new(kyc: Arc<dyn KycServicePort>, config: ApiConfig) -> Self {
        let store = Arc::new(KycStatusStore::new());
        let controller = Arc::new(SubmissionController::new(
            kyc.clone(),
            store.clone(),
            config.submission_mode,
        ));
        let reconciler = Arc::new(StatusReconciler::new(kyc.clone(), store.clone()));
        Self {
            kyc,
            store,
            controller,
            reconciler,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Wired application state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/token", post(token::issue_token));

    // KYC routes for the authenticated user
    let kyc_routes = Router::new()
        .route("/investor", post(kyc::submit_investor))
        .route("/builder", post(kyc::submit_builder))
        .route("/status", get(kyc::get_status))
        .route("/status/refresh", post(kyc::refresh_status))
        .route("/resubmit", post(kyc::resubmit));

    // Admin decision routes
    let admin_routes = Router::new()
        .route("/kyc/:user_id/approve", post(admin::approve_kyc))
        .route("/kyc/:user_id/reject", post(admin::reject_kyc));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/kyc", kyc_routes)
        .nest("/admin", admin_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
