//! KYC status lifecycle
//!
//! The local 5-value vocabulary shared by both roles, and the 3-value
//! vocabulary the remote decision service speaks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// KYC status as persisted on the platform
///
/// Monotonic under the normal flow: `NotStarted -> InProgress -> Pending ->
/// {Approved | Rejected}`. The single permitted backward edge is
/// `Rejected -> InProgress`, taken only through an explicit resubmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    NotStarted,
    InProgress,
    Pending,
    Approved,
    Rejected,
}

impl KycStatus {
    /// Returns true once the remote service (or mock mode) has decided
    pub fn is_decided(&self) -> bool {
        matches!(self, KycStatus::Approved | KycStatus::Rejected)
    }

    /// Returns true while the user still has wizard work to do
    pub fn needs_wizard(&self) -> bool {
        matches!(self, KycStatus::NotStarted | KycStatus::InProgress)
    }

    /// Checks whether a transition is allowed under the lifecycle rules
    ///
    /// Re-asserting the current status is always allowed (reconciliation is
    /// idempotent); `Approved` is terminal.
    pub fn can_transition_to(&self, next: KycStatus) -> bool {
        if *self == next {
            return true;
        }
        match (*self, next) {
            (KycStatus::NotStarted, KycStatus::InProgress) => true,
            (KycStatus::InProgress, KycStatus::Pending) => true,
            // Mock mode approves straight from the wizard
            (KycStatus::InProgress, KycStatus::Approved) => true,
            (KycStatus::Pending, KycStatus::Approved) => true,
            (KycStatus::Pending, KycStatus::Rejected) => true,
            // Explicit resubmission only
            (KycStatus::Rejected, KycStatus::InProgress) => true,
            _ => false,
        }
    }
}

impl Default for KycStatus {
    fn default() -> Self {
        KycStatus::NotStarted
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KycStatus::NotStarted => "not_started",
            KycStatus::InProgress => "in_progress",
            KycStatus::Pending => "pending",
            KycStatus::Approved => "approved",
            KycStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Decision vocabulary of the remote KYC service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteKycStatus {
    Verified,
    Rejected,
    Pending,
}

impl RemoteKycStatus {
    /// Maps the remote vocabulary onto the local one
    ///
    /// Only `pending`, `rejected`, and `approved` are ever produced here;
    /// the remote source can never push a user back to `not_started` or
    /// `in_progress`.
    pub fn to_local(self) -> KycStatus {
        match self {
            RemoteKycStatus::Verified => KycStatus::Approved,
            RemoteKycStatus::Rejected => KycStatus::Rejected,
            RemoteKycStatus::Pending => KycStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_flow_is_monotonic() {
        assert!(KycStatus::NotStarted.can_transition_to(KycStatus::InProgress));
        assert!(KycStatus::InProgress.can_transition_to(KycStatus::Pending));
        assert!(KycStatus::Pending.can_transition_to(KycStatus::Approved));
        assert!(KycStatus::Pending.can_transition_to(KycStatus::Rejected));
    }

    #[test]
    fn test_no_skipping_to_decision() {
        assert!(!KycStatus::NotStarted.can_transition_to(KycStatus::Approved));
        assert!(!KycStatus::NotStarted.can_transition_to(KycStatus::Rejected));
        assert!(!KycStatus::InProgress.can_transition_to(KycStatus::Rejected));
    }

    #[test]
    fn test_resubmission_edge() {
        assert!(KycStatus::Rejected.can_transition_to(KycStatus::InProgress));
        assert!(!KycStatus::Approved.can_transition_to(KycStatus::InProgress));
    }

    #[test]
    fn test_self_transition_allowed() {
        for status in [
            KycStatus::NotStarted,
            KycStatus::InProgress,
            KycStatus::Pending,
            KycStatus::Approved,
            KycStatus::Rejected,
        ] {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn test_phase_predicates() {
        assert!(KycStatus::Approved.is_decided());
        assert!(KycStatus::Rejected.is_decided());
        assert!(!KycStatus::Pending.is_decided());
        assert!(KycStatus::NotStarted.needs_wizard());
        assert!(KycStatus::InProgress.needs_wizard());
        assert!(!KycStatus::Rejected.needs_wizard());
    }

    #[test]
    fn test_remote_mapping() {
        assert_eq!(RemoteKycStatus::Verified.to_local(), KycStatus::Approved);
        assert_eq!(RemoteKycStatus::Rejected.to_local(), KycStatus::Rejected);
        assert_eq!(RemoteKycStatus::Pending.to_local(), KycStatus::Pending);
    }

    #[test]
    fn test_serde_vocabularies() {
        assert_eq!(
            serde_json::to_string(&KycStatus::NotStarted).unwrap(),
            "\"not_started\""
        );
        let remote: RemoteKycStatus = serde_json::from_str("\"VERIFIED\"").unwrap();
        assert_eq!(remote, RemoteKycStatus::Verified);
    }
}
