//! Onboarding Workflow Domain
//!
//! This crate drives a user from signup to an approved KYC status:
//!
//! - [`wizard`]: the generic step sequencer owning a role's form record,
//!   with per-step validation gates
//! - [`camera`]: scoped acquisition of the selfie capture device
//! - [`store`]: the injected [`store::KycStatusStore`] service holding the
//!   persisted status + combined user record
//! - [`submission`]: the terminal-step submission controller with its
//!   mock/live branching
//! - [`reconciler`]: synchronization of the persisted status against the
//!   remote decision
//! - [`routing`]: entry-route resolution and the role route guard
//!
//! # Writers
//!
//! Exactly two components write a decided status: the submission controller
//! (`pending`, or `approved` in mock mode) and the reconciler (remote
//! decision mapping). Everything else only reads the store.

pub mod camera;
pub mod error;
pub mod reconciler;
pub mod routing;
pub mod store;
pub mod submission;
pub mod wizard;

pub use camera::{CameraDevice, CameraError, CameraSession, CameraStream};
#[cfg(any(test, feature = "mock"))]
pub use camera::mock::MockCameraDevice;
pub use error::OnboardingError;
pub use reconciler::StatusReconciler;
pub use routing::{resolve_entry_route, GuardDecision, Route, RouteGuard};
pub use store::{KycStatusStore, UserKycRecord};
pub use submission::{SubmissionController, SubmissionMode, SubmitOutcome};
pub use wizard::{KycFlow, Wizard, WizardError};
