//! Core Kernel - Foundational types and utilities for the PropShare platform
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for users, submissions, and documents
//! - The platform role vocabulary (investor / builder / admin)
//! - Common error types and the ports-and-adapters infrastructure

pub mod error;
pub mod identifiers;
pub mod ports;
pub mod role;

pub use error::CoreError;
pub use identifiers::{DecisionId, DocumentId, SubmissionId, UserId};
pub use ports::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable,
    OperationMetadata, PortError,
};
pub use role::Role;
