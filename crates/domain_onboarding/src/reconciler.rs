//! Status reconciliation against the remote decision service
//!
//! The reconciler is the second of the two status writers. It pulls the
//! remote decision, maps the 3-value remote vocabulary onto the local
//! lifecycle and persists the result only when the lifecycle rules permit
//! the move. Fetch failures and unmappable statuses are soft failures: the
//! store keeps its last known value and the attempt is logged.

use std::sync::Arc;

use tracing::{debug, info, warn};

use core_kernel::{Role, UserId};
use domain_kyc::{KycServicePort, KycStatus};

use crate::error::OnboardingError;
use crate::store::KycStatusStore;

/// Pull-based synchronizer between the store and the remote decision
pub struct StatusReconciler {
    service: Arc<dyn KycServicePort>,
    store: Arc<KycStatusStore>,
}

impl StatusReconciler {
    pub fn new(service: Arc<dyn KycServicePort>, store: Arc<KycStatusStore>) -> Self {
        Self { service, store }
    }

    /// Fetches the remote decision and folds it into the store
    ///
    /// # Returns
    /// The newly persisted status when the store changed, `None` when the
    /// remote value matched the local one, the move was not permitted, or
    /// the fetch failed
    pub async fn reconcile(&self, user: UserId, role: Role) -> Option<KycStatus> {
        let current = self.store.status_of(user).await;
        if current.needs_wizard() {
            debug!(%user, status = %current, "Nothing submitted yet, skipping decision fetch");
            return None;
        }

        let decision = match self.service.fetch_decision(user, role, None).await {
            Ok(decision) => decision,
            Err(error) => {
                warn!(%user, %error, "Decision fetch failed, keeping local status");
                return None;
            }
        };

        let mapped = decision.status.to_local();
        if mapped == current {
            debug!(%user, status = %current, "Remote decision matches local status");
            return None;
        }
        if !current.can_transition_to(mapped) {
            warn!(
                %user,
                from = %current,
                to = %mapped,
                "Remote decision would break the status lifecycle, ignoring"
            );
            return None;
        }

        match self
            .store
            .set_status(user, role, mapped, decision.rejection_reason)
            .await
        {
            Ok(record) => {
                info!(%user, status = %record.status, "Reconciled status from remote decision");
                Some(record.status)
            }
            Err(error) => {
                warn!(%user, %error, "Status write failed during reconciliation");
                None
            }
        }
    }

    /// Re-opens the wizard after a rejection
    ///
    /// The status moves back to `in_progress` and the stored rejection
    /// reason is cleared in the same write.
    pub async fn resubmit(&self, user: UserId, role: Role) -> Result<KycStatus, OnboardingError> {
        let current = self.store.status_of(user).await;
        if current != KycStatus::Rejected {
            return Err(OnboardingError::ResubmitNotAvailable(current));
        }

        let record = self
            .store
            .set_status(user, role, KycStatus::InProgress, None)
            .await?;
        info!(%user, "Rejected KYC re-opened for resubmission");
        Ok(record.status)
    }
}
