//! Persisted KYC status store
//!
//! The store is the single source of truth for a user's KYC standing. Status
//! and rejection reason always change together under one write lock, so no
//! reader can observe a rejected status with a stale reason. A `watch`
//! channel carries a version counter so interested components (the route
//! guard, status pages) can react to changes without polling.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use core_kernel::{CoreError, Role, UserId};
use domain_kyc::KycStatus;
use tokio::sync::{watch, RwLock};

/// A user's combined KYC record
#[derive(Debug, Clone, PartialEq)]
pub struct UserKycRecord {
    pub user: UserId,
    pub role: Role,
    pub status: KycStatus,
    /// Set only while the status is rejected
    pub rejection_reason: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Concurrent store of per-user KYC records
pub struct KycStatusStore {
    records: RwLock<HashMap<UserId, UserKycRecord>>,
    version_tx: watch::Sender<u64>,
}

impl Default for KycStatusStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KycStatusStore {
    pub fn new() -> Self {
        let (version_tx, _) = watch::channel(0);
        Self {
            records: RwLock::new(HashMap::new()),
            version_tx,
        }
    }

    /// Fetches a user's record, if one exists
    pub async fn get(&self, user: UserId) -> Option<UserKycRecord> {
        self.records.read().await.get(&user).cloned()
    }

    /// A user's current status; users without a record have not started
    pub async fn status_of(&self, user: UserId) -> KycStatus {
        self.records
            .read()
            .await
            .get(&user)
            .map(|record| record.status)
            .unwrap_or_default()
    }

    /// Moves a user's status, enforcing the transition rules
    ///
    /// The rejection reason is written in the same critical section as the
    /// status. Passing a reason with a non-rejected status is ignored; a
    /// rejected status without a reason clears any prior one.
    ///
    /// # Returns
    /// The updated record, or [`CoreError::InvalidStateTransition`] when the
    /// move is not allowed from the current status
    pub async fn set_status(
        &self,
        user: UserId,
        role: Role,
        status: KycStatus,
        rejection_reason: Option<String>,
    ) -> Result<UserKycRecord, CoreError> {
        let mut records = self.records.write().await;
        let current = records
            .get(&user)
            .map(|record| record.status)
            .unwrap_or_default();

        if !current.can_transition_to(status) {
            return Err(CoreError::invalid_state(format!(
                "KYC status cannot move from {current} to {status}"
            )));
        }

        let reason = if status == KycStatus::Rejected {
            rejection_reason
        } else {
            None
        };

        let record = UserKycRecord {
            user,
            role,
            status,
            rejection_reason: reason,
            updated_at: Utc::now(),
        };
        records.insert(user, record.clone());
        drop(records);

        self.version_tx.send_modify(|v| *v += 1);
        Ok(record)
    }

    /// Subscribes to store changes; the value is a monotonic version counter
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_user_has_not_started() {
        let store = KycStatusStore::new();
        let user = UserId::new();
        assert_eq!(store.status_of(user).await, KycStatus::NotStarted);
        assert!(store.get(user).await.is_none());
    }

    #[tokio::test]
    async fn test_valid_transition_updates_record_and_version() {
        let store = KycStatusStore::new();
        let user = UserId::new();
        let mut version = store.subscribe();
        let initial = *version.borrow();

        let record = store
            .set_status(user, Role::Investor, KycStatus::InProgress, None)
            .await
            .unwrap();
        assert_eq!(record.status, KycStatus::InProgress);
        assert_eq!(record.role, Role::Investor);

        version.changed().await.unwrap();
        assert!(*version.borrow() > initial);
    }

    #[tokio::test]
    async fn test_invalid_transition_leaves_record_untouched() {
        let store = KycStatusStore::new();
        let user = UserId::new();

        // not_started -> approved skips the flow entirely
        let err = store
            .set_status(user, Role::Investor, KycStatus::Approved, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidStateTransition(_)));
        assert!(store.get(user).await.is_none());
    }

    #[tokio::test]
    async fn test_rejection_reason_written_and_cleared_atomically() {
        let store = KycStatusStore::new();
        let user = UserId::new();

        store
            .set_status(user, Role::Investor, KycStatus::InProgress, None)
            .await
            .unwrap();
        store
            .set_status(user, Role::Investor, KycStatus::Pending, None)
            .await
            .unwrap();
        let rejected = store
            .set_status(
                user,
                Role::Investor,
                KycStatus::Rejected,
                Some("Blurry document scan".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Blurry document scan")
        );

        // Resubmission clears the reason along with the status
        let resumed = store
            .set_status(user, Role::Investor, KycStatus::InProgress, None)
            .await
            .unwrap();
        assert_eq!(resumed.status, KycStatus::InProgress);
        assert!(resumed.rejection_reason.is_none());
    }

    #[tokio::test]
    async fn test_reason_ignored_for_non_rejected_status() {
        let store = KycStatusStore::new();
        let user = UserId::new();

        let record = store
            .set_status(
                user,
                Role::Builder,
                KycStatus::InProgress,
                Some("should not stick".to_string()),
            )
            .await
            .unwrap();
        assert!(record.rejection_reason.is_none());
    }
}
