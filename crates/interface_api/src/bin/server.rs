//! PropShare KYC Core - API Server Binary
//!
//! This binary starts the HTTP API server for the KYC onboarding system.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration (mock submission mode)
//! cargo run --bin propshare-kyc-api
//!
//! # Run against a live verification service
//! API_SUBMISSION_MODE=live API_KYC_BASE_URL=https://kyc.example.com cargo run --bin propshare-kyc-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_SUBMISSION_MODE` - `mock` or `live` (default: mock)
//! * `API_KYC_BASE_URL` - Remote KYC service base URL (live mode)
//! * `API_KYC_API_KEY` - Bearer token for the remote KYC service
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_kyc::{KycServicePort, MockKycServicePort, RemoteKycAdapter, RemoteKycConfig};
use domain_onboarding::SubmissionMode;
use interface_api::{config::ApiConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the KYC service port,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The remote KYC adapter cannot be constructed
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config()?;

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        mode = ?config.submission_mode,
        "Starting PropShare KYC API Server"
    );

    // Wire the KYC service port for the configured mode
    let kyc = create_kyc_port(&config)?;

    // Create the API router
    let app = create_router(AppState::new(kyc, config.clone()));

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to default values if environment variables are not set.
fn load_config() -> Result<ApiConfig, Box<dyn std::error::Error>> {
    // Try to load from environment with API_ prefix
    let config = ApiConfig::from_env().unwrap_or_else(|_| {
        // Fall back to individual env vars or defaults
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: std::env::var("API_JWT_SECRET")
                .unwrap_or_else(|_| "dev-secret-change-in-production".to_string()),
            jwt_expiration_secs: std::env::var("API_JWT_EXPIRATION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
            submission_mode: match std::env::var("API_SUBMISSION_MODE").as_deref() {
                Ok("live") => SubmissionMode::Live,
                _ => SubmissionMode::Mock,
            },
            kyc_base_url: std::env::var("API_KYC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:9090".to_string()),
            kyc_api_key: std::env::var("API_KYC_API_KEY").ok(),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
        }
    });

    Ok(config)
}

/// Builds the KYC service port for the configured submission mode.
///
/// Mock mode runs entirely in-process; live mode talks to the remote
/// verification service over HTTP.
fn create_kyc_port(config: &ApiConfig) -> Result<Arc<dyn KycServicePort>, Box<dyn std::error::Error>> {
    match config.submission_mode {
        SubmissionMode::Mock => {
            tracing::info!("Using in-process mock KYC service");
            Ok(Arc::new(MockKycServicePort::new()))
        }
        SubmissionMode::Live => {
            tracing::info!(base_url = %config.kyc_base_url, "Using remote KYC service");
            let adapter = RemoteKycAdapter::new(RemoteKycConfig {
                base_url: config.kyc_base_url.clone(),
                api_key: config.kyc_api_key.clone(),
                ..RemoteKycConfig::default()
            })?;
            Ok(Arc::new(adapter))
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
