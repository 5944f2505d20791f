//! Terminal-step submission controller
//!
//! Submission runs after the full-form validation on the review step. The
//! declaration gate fires before anything leaves the process; in mock mode
//! the controller short-circuits to an immediate local approval after a
//! small simulated delay, while live mode talks to the remote verification
//! service. The builder flow records locally in both modes because the
//! remote service only exposes an investor submission endpoint.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use core_kernel::{Role, UserId};
use domain_kyc::{
    validate_builder_step, validate_investor_step, BuilderKycForm, BuilderStep, InvestorKycForm,
    InvestorStep, KycServicePort, KycStatus, SubmitKycRequest,
};

use crate::error::OnboardingError;
use crate::store::KycStatusStore;

/// Which submission path the controller takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    /// Local approval without a remote round trip (development)
    Mock,
    /// Remote submission through the KYC service port
    Live,
}

/// What happened to a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Mock mode: the status was moved straight to approved
    Approved,
    /// Live mode: the remote service acknowledged and the status is pending
    PendingSubmitted,
    /// The status was recorded pending locally with no remote call
    PendingLocal,
}

/// Drives the review-step submission for both roles
pub struct SubmissionController {
    service: Arc<dyn KycServicePort>,
    store: Arc<KycStatusStore>,
    mode: SubmissionMode,
    /// Simulated processing delay applied in mock mode
    mock_delay: Duration,
}

impl SubmissionController {
    pub fn new(
        service: Arc<dyn KycServicePort>,
        store: Arc<KycStatusStore>,
        mode: SubmissionMode,
    ) -> Self {
        Self {
            service,
            store,
            mode,
            mock_delay: Duration::from_millis(1500),
        }
    }

    /// Overrides the mock-mode delay (tests use zero)
    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    pub fn mode(&self) -> SubmissionMode {
        self.mode
    }

    /// Submits a completed investor form
    ///
    /// The declaration gate and a final full-form validation pass run before
    /// any status write or network call. On a remote decline the persisted
    /// status is left untouched so the user can retry from the review step.
    pub async fn submit_investor(
        &self,
        user: UserId,
        form: &InvestorKycForm,
    ) -> Result<SubmitOutcome, OnboardingError> {
        if !form.declaration_accepted {
            return Err(OnboardingError::DeclarationNotAccepted);
        }
        for step in InvestorStep::ALL {
            let errors = validate_investor_step(step, form);
            if !errors.is_empty() {
                return Err(OnboardingError::Kyc(
                    domain_kyc::KycError::validation(errors.summary()),
                ));
            }
        }

        match self.mode {
            SubmissionMode::Mock => {
                tokio::time::sleep(self.mock_delay).await;
                self.record_decided(user, Role::Investor, KycStatus::Approved)
                    .await?;
                info!(%user, "Investor KYC auto-approved (mock mode)");
                Ok(SubmitOutcome::Approved)
            }
            SubmissionMode::Live => {
                let request =
                    SubmitKycRequest::pan(form.personal.pan.clone(), form.selfie_image.clone());
                let response = self
                    .service
                    .submit_investor_kyc(user, request, None)
                    .await?;

                if !response.success {
                    let message = response
                        .message
                        .unwrap_or_else(|| "Submission was not accepted".to_string());
                    warn!(%user, %message, "Investor KYC submission declined");
                    return Err(OnboardingError::SubmissionFailed(message));
                }

                self.record_decided(user, Role::Investor, KycStatus::Pending)
                    .await?;
                info!(%user, "Investor KYC submitted, awaiting verification");
                Ok(SubmitOutcome::PendingSubmitted)
            }
        }
    }

    /// Submits a completed builder form
    ///
    /// There is no remote builder endpoint, so live mode records the
    /// submission as pending locally and the decision arrives later through
    /// the admin feed via the reconciler.
    pub async fn submit_builder(
        &self,
        user: UserId,
        form: &BuilderKycForm,
    ) -> Result<SubmitOutcome, OnboardingError> {
        if !form.declaration_accepted {
            return Err(OnboardingError::DeclarationNotAccepted);
        }
        for step in BuilderStep::ALL {
            let errors = validate_builder_step(step, form);
            if !errors.is_empty() {
                return Err(OnboardingError::Kyc(
                    domain_kyc::KycError::validation(errors.summary()),
                ));
            }
        }

        match self.mode {
            SubmissionMode::Mock => {
                tokio::time::sleep(self.mock_delay).await;
                self.record_decided(user, Role::Builder, KycStatus::Approved)
                    .await?;
                info!(%user, "Builder KYC auto-approved (mock mode)");
                Ok(SubmitOutcome::Approved)
            }
            SubmissionMode::Live => {
                self.record_decided(user, Role::Builder, KycStatus::Pending)
                    .await?;
                info!(%user, "Builder KYC recorded, awaiting manual review");
                Ok(SubmitOutcome::PendingLocal)
            }
        }
    }

    /// Moves a user to a post-submission status, passing through
    /// `in_progress` first when the wizard was never entered
    async fn record_decided(
        &self,
        user: UserId,
        role: Role,
        target: KycStatus,
    ) -> Result<(), OnboardingError> {
        if self.store.status_of(user).await == KycStatus::NotStarted {
            self.store
                .set_status(user, role, KycStatus::InProgress, None)
                .await?;
        }
        self.store.set_status(user, role, target, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_kyc::form::{
        AccountType, AnnualIncomeBand, BusinessType, Gender, Occupation, RiskAppetite,
    };
    use domain_kyc::MockKycServicePort;

    fn valid_investor_form() -> InvestorKycForm {
        let mut form = InvestorKycForm::default();
        form.personal.full_name = "Asha Rao".to_string();
        form.personal.email = "asha@example.com".to_string();
        form.set_mobile("9876543210");
        form.personal.date_of_birth = "1990-03-14".to_string();
        form.personal.gender = Some(Gender::Female);
        form.set_pan("ABCDE1234F");
        form.set_aadhaar("123456789012");
        form.resident_address.line1 = "12 MG Road".to_string();
        form.resident_address.city = "Bengaluru".to_string();
        form.resident_address.state = "Karnataka".to_string();
        form.resident_address.set_pincode("560001");
        form.set_same_as_permanent(true);
        form.bank.account_holder_name = "Asha Rao".to_string();
        form.bank.bank_name = "HDFC Bank".to_string();
        form.set_account_number("1234567890");
        form.set_confirm_account_number("1234567890");
        form.set_ifsc_code("HDFC0001234");
        form.bank.account_type = Some(AccountType::Savings);
        form.income.annual_income = Some(AnnualIncomeBand::TenToTwentyFive);
        form.income.occupation = Some(Occupation::Salaried);
        form.income.source_of_funds = vec!["Salary".to_string()];
        form.income.risk_appetite = Some(RiskAppetite::Medium);
        form.selfie_image = Some("data:image/png;base64,AA".to_string());
        form.declaration_accepted = true;
        form
    }

    fn valid_builder_form() -> BuilderKycForm {
        let mut form = BuilderKycForm::default();
        form.company.company_name = "Skyline Estates Pvt Ltd".to_string();
        form.company.business_type = Some(BusinessType::PrivateLimited);
        form.set_year_of_establishment("2015");
        form.set_company_pan("AAACS1234L");
        form.company.official_email = "ops@skyline.example".to_string();
        form.set_official_mobile("9123456780");
        form.registered_address.line1 = "4 Residency Road".to_string();
        form.registered_address.city = "Bengaluru".to_string();
        form.registered_address.state = "Karnataka".to_string();
        form.registered_address.set_pincode("560025");
        form.set_same_as_site_office(true);
        form.documents.company_pan_file = Some("pan.pdf".to_string());
        form.documents.cin_llpin_file = Some("cin.pdf".to_string());
        form.documents.rera_number = "PRM/KA/RERA/1251/446".to_string();
        form.documents.rera_certificate_file = Some("rera.pdf".to_string());
        form.bank.account_holder_name = "Skyline Estates Pvt Ltd".to_string();
        form.bank.bank_name = "ICICI Bank".to_string();
        form.set_account_number("000405001234");
        form.set_ifsc_code("ICIC0000004");
        form.bank.cancelled_cheque_file = Some("cheque.pdf".to_string());
        form.authorized_person.name = "R. Iyer".to_string();
        form.authorized_person.designation = "Director".to_string();
        form.set_auth_person_mobile("9988776655");
        form.authorized_person.email = "iyer@skyline.example".to_string();
        form.set_auth_person_pan("AVQPI5678K");
        form.authorized_person.id_proof_file = Some("id.pdf".to_string());
        form.authorized_person.selfie_with_id_file = Some("selfie.jpg".to_string());
        form.declaration_accepted = true;
        form
    }

    fn controller(mode: SubmissionMode) -> (SubmissionController, Arc<MockKycServicePort>, Arc<KycStatusStore>) {
        let service = Arc::new(MockKycServicePort::new());
        let store = Arc::new(KycStatusStore::new());
        let controller = SubmissionController::new(service.clone(), store.clone(), mode)
            .with_mock_delay(Duration::ZERO);
        (controller, service, store)
    }

    #[tokio::test]
    async fn test_declaration_gate_blocks_before_any_side_effect() {
        let (controller, service, store) = controller(SubmissionMode::Live);
        let user = UserId::new();
        let mut form = valid_investor_form();
        form.declaration_accepted = false;

        let err = controller.submit_investor(user, &form).await.unwrap_err();
        assert!(matches!(err, OnboardingError::DeclarationNotAccepted));
        assert!(service.submissions().await.is_empty());
        assert_eq!(store.status_of(user).await, KycStatus::NotStarted);
    }

    #[tokio::test]
    async fn test_mock_mode_approves_locally_without_network() {
        let (controller, service, store) = controller(SubmissionMode::Mock);
        let user = UserId::new();

        let outcome = controller
            .submit_investor(user, &valid_investor_form())
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Approved);
        assert_eq!(store.status_of(user).await, KycStatus::Approved);
        assert!(service.submissions().await.is_empty());
    }

    #[tokio::test]
    async fn test_live_mode_moves_status_to_pending_on_success() {
        let (controller, service, store) = controller(SubmissionMode::Live);
        let user = UserId::new();

        let outcome = controller
            .submit_investor(user, &valid_investor_form())
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::PendingSubmitted);
        assert_eq!(store.status_of(user).await, KycStatus::Pending);

        let submissions = service.submissions().await;
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].1.document_number, "ABCDE1234F");
        assert_eq!(submissions[0].1.document_type, "PAN");
    }

    #[tokio::test]
    async fn test_remote_decline_leaves_status_untouched() {
        let (controller, service, store) = controller(SubmissionMode::Live);
        let user = UserId::new();
        service.set_reject_submissions(true);

        let err = controller
            .submit_investor(user, &valid_investor_form())
            .await
            .unwrap_err();
        assert!(matches!(err, OnboardingError::SubmissionFailed(_)));
        assert_eq!(store.status_of(user).await, KycStatus::NotStarted);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates_and_status_untouched() {
        let (controller, service, store) = controller(SubmissionMode::Live);
        let user = UserId::new();
        service.set_offline(true);

        let err = controller
            .submit_investor(user, &valid_investor_form())
            .await
            .unwrap_err();
        assert!(matches!(err, OnboardingError::Port(_)));
        assert_eq!(store.status_of(user).await, KycStatus::NotStarted);
    }

    #[tokio::test]
    async fn test_builder_live_submission_records_locally() {
        let (controller, service, store) = controller(SubmissionMode::Live);
        let user = UserId::new();

        let outcome = controller
            .submit_builder(user, &valid_builder_form())
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::PendingLocal);
        assert_eq!(store.status_of(user).await, KycStatus::Pending);
        // No remote endpoint is involved for builders
        assert!(service.submissions().await.is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_form_is_rejected_before_submission() {
        let (controller, service, _store) = controller(SubmissionMode::Live);
        let user = UserId::new();
        let mut form = valid_investor_form();
        form.personal.pan.clear();

        let err = controller.submit_investor(user, &form).await.unwrap_err();
        assert!(matches!(err, OnboardingError::Kyc(_)));
        assert!(service.submissions().await.is_empty());
    }
}
