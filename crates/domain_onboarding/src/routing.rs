//! Entry-route resolution and the role route guard
//!
//! Two cooperating pieces keep users inside the part of the product their
//! KYC standing allows:
//!
//! - [`resolve_entry_route`] is the pure status-to-destination mapping used
//!   when a user lands on their role's dashboard root
//! - [`RouteGuard`] protects deeper role routes; instead of deciding the
//!   final destination itself it redirects undecided users back to the
//!   dashboard root, where entry resolution takes over. The guard therefore
//!   never needs to duplicate the status mapping.

use core_kernel::Role;
use domain_kyc::KycStatus;

use crate::store::UserKycRecord;

/// Destinations the onboarding flow can send a user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The role's KYC wizard
    Wizard,
    /// The read-only status page (pending review or rejection details)
    StatusPage,
    /// The role's dashboard
    Dashboard,
    /// Sign-in
    Login,
}

/// Maps a KYC status to the landing destination for the dashboard root
pub fn resolve_entry_route(status: KycStatus) -> Route {
    match status {
        KycStatus::NotStarted | KycStatus::InProgress => Route::Wizard,
        KycStatus::Pending | KycStatus::Rejected => Route::StatusPage,
        KycStatus::Approved => Route::Dashboard,
    }
}

/// Verdict for a guarded route request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Send the user elsewhere; the status mapping runs at the destination
    Redirect(Route),
    /// Unauthenticated or wrong role
    Block,
}

/// Protects role-prefixed routes against undecided or foreign users
pub struct RouteGuard {
    role: Role,
}

impl RouteGuard {
    /// Builds a guard for one role's route subtree
    pub fn for_role(role: Role) -> Self {
        Self { role }
    }

    /// The dashboard root under this guard's role prefix
    fn dashboard_root(&self) -> String {
        format!("{}/dashboard", self.role.route_prefix())
    }

    /// Checks a request against the guard
    ///
    /// Approved users (and roles without a KYC requirement) pass. Undecided
    /// users may only reach the dashboard root and logout; anything deeper
    /// redirects to the dashboard root so [`resolve_entry_route`] can place
    /// them in the wizard or on the status page.
    pub fn check(&self, record: Option<&UserKycRecord>, path: &str) -> GuardDecision {
        let record = match record {
            Some(record) => record,
            None => return GuardDecision::Block,
        };
        if record.role != self.role {
            return GuardDecision::Block;
        }
        if !self.role.requires_kyc() {
            return GuardDecision::Allow;
        }
        if record.status == KycStatus::Approved {
            return GuardDecision::Allow;
        }

        // Undecided: the landing page itself and logout stay reachable
        if path == self.dashboard_root() || path.ends_with("/logout") {
            return GuardDecision::Allow;
        }
        GuardDecision::Redirect(Route::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::UserId;

    fn record(role: Role, status: KycStatus) -> UserKycRecord {
        UserKycRecord {
            user: UserId::new(),
            role,
            status,
            rejection_reason: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_entry_route_per_status() {
        assert_eq!(resolve_entry_route(KycStatus::NotStarted), Route::Wizard);
        assert_eq!(resolve_entry_route(KycStatus::InProgress), Route::Wizard);
        assert_eq!(resolve_entry_route(KycStatus::Pending), Route::StatusPage);
        assert_eq!(resolve_entry_route(KycStatus::Rejected), Route::StatusPage);
        assert_eq!(resolve_entry_route(KycStatus::Approved), Route::Dashboard);
    }

    #[test]
    fn test_guard_blocks_missing_or_foreign_users() {
        let guard = RouteGuard::for_role(Role::Investor);
        assert_eq!(guard.check(None, "/investor/portfolio"), GuardDecision::Block);

        let builder = record(Role::Builder, KycStatus::Approved);
        assert_eq!(
            guard.check(Some(&builder), "/investor/portfolio"),
            GuardDecision::Block
        );
    }

    #[test]
    fn test_guard_allows_approved_users_everywhere() {
        let guard = RouteGuard::for_role(Role::Investor);
        let approved = record(Role::Investor, KycStatus::Approved);
        assert_eq!(
            guard.check(Some(&approved), "/investor/portfolio/holdings"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_guard_redirects_undecided_users_to_dashboard_root() {
        let guard = RouteGuard::for_role(Role::Investor);
        for status in [
            KycStatus::NotStarted,
            KycStatus::InProgress,
            KycStatus::Pending,
            KycStatus::Rejected,
        ] {
            let undecided = record(Role::Investor, status);
            assert_eq!(
                guard.check(Some(&undecided), "/investor/portfolio"),
                GuardDecision::Redirect(Route::Dashboard),
                "status {status} should redirect"
            );
        }
    }

    #[test]
    fn test_guard_keeps_landing_and_logout_reachable() {
        let guard = RouteGuard::for_role(Role::Builder);
        let pending = record(Role::Builder, KycStatus::Pending);
        assert_eq!(
            guard.check(Some(&pending), "/builder/dashboard"),
            GuardDecision::Allow
        );
        assert_eq!(
            guard.check(Some(&pending), "/builder/logout"),
            GuardDecision::Allow
        );
        // The redirect chain: deep route -> dashboard root -> status page
        assert_eq!(
            guard.check(Some(&pending), "/builder/projects/new"),
            GuardDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(resolve_entry_route(pending.status), Route::StatusPage);
    }

    #[test]
    fn test_admin_routes_skip_the_kyc_gate() {
        let guard = RouteGuard::for_role(Role::Admin);
        let admin = record(Role::Admin, KycStatus::NotStarted);
        assert_eq!(
            guard.check(Some(&admin), "/admin/kyc-queue"),
            GuardDecision::Allow
        );
    }
}
