//! Generic KYC wizard engine
//!
//! One sequencer drives both role flows. A [`KycFlow`] implementation ties a
//! form record to its ordered step enum and per-step validator; the
//! [`Wizard`] owns the form for the duration of the flow and enforces the
//! navigation rules:
//!
//! - `advance` moves forward only when the current step validates cleanly
//! - `retreat` moves backward unconditionally (no re-validation of the step
//!   being left)
//! - `jump_to` is the review step's "Edit" affordance and is rejected from
//!   anywhere else
//! - on the review step `advance` is replaced by submission
//!   ([`crate::submission::SubmissionController`])

use std::fmt;
use thiserror::Error;

use domain_kyc::{
    validate_builder_step, validate_investor_step, BuilderKycForm, BuilderStep, FieldErrors,
    InvestorKycForm, InvestorStep,
};

/// A role's wizard flow: the form record plus its step schema and validators
pub trait KycFlow {
    /// Ordered step enum for this flow
    type Step: Copy + Eq + fmt::Debug;

    /// Number of steps, review included
    const STEP_COUNT: usize;

    /// First step of the flow
    fn first_step() -> Self::Step;

    /// Terminal (review) step of the flow
    fn review_step() -> Self::Step;

    /// Step at a 1-based index, if in range
    fn step_at(index: usize) -> Option<Self::Step>;

    /// 1-based index of a step
    fn index_of(step: Self::Step) -> usize;

    /// Runs the pure per-step validator against the current form state
    fn validate(&self, step: Self::Step) -> FieldErrors;
}

impl KycFlow for InvestorKycForm {
    type Step = InvestorStep;

    const STEP_COUNT: usize = InvestorStep::ALL.len();

    fn first_step() -> InvestorStep {
        InvestorStep::Personal
    }

    fn review_step() -> InvestorStep {
        InvestorStep::Review
    }

    fn step_at(index: usize) -> Option<InvestorStep> {
        InvestorStep::from_index(index)
    }

    fn index_of(step: InvestorStep) -> usize {
        step.index()
    }

    fn validate(&self, step: InvestorStep) -> FieldErrors {
        validate_investor_step(step, self)
    }
}

impl KycFlow for BuilderKycForm {
    type Step = BuilderStep;

    const STEP_COUNT: usize = BuilderStep::ALL.len();

    fn first_step() -> BuilderStep {
        BuilderStep::Company
    }

    fn review_step() -> BuilderStep {
        BuilderStep::Review
    }

    fn step_at(index: usize) -> Option<BuilderStep> {
        BuilderStep::from_index(index)
    }

    fn index_of(step: BuilderStep) -> usize {
        step.index()
    }

    fn validate(&self, step: BuilderStep) -> FieldErrors {
        validate_builder_step(step, self)
    }
}

/// Navigation errors raised by the wizard
#[derive(Debug, Error)]
pub enum WizardError {
    /// The current step failed validation; forward navigation is blocked
    #[error("Step blocked by validation: {}", errors.summary())]
    StepBlocked { errors: FieldErrors },

    /// Direct navigation is only available from the review step
    #[error("Jumping to an arbitrary step is only allowed from review")]
    JumpNotAllowed,

    /// `advance` called on the review step, where submission takes over
    #[error("The review step is terminal; submit instead of advancing")]
    AtReview,
}

/// The step sequencer, owning a flow's form record
///
/// `current_step` stays within `[1, STEP_COUNT]`; the wizard starts at step 1
/// and the form survives every navigation (steps never drop data).
#[derive(Debug)]
pub struct Wizard<F: KycFlow> {
    form: F,
    current: F::Step,
    /// Validation output of the last blocked advance, for display
    errors: FieldErrors,
}

impl<F: KycFlow + Default> Wizard<F> {
    /// Starts a wizard with an empty form at step 1
    pub fn start() -> Self {
        Self::with_form(F::default())
    }
}

impl<F: KycFlow> Wizard<F> {
    /// Starts a wizard over an existing form record (resubmission re-enters
    /// at step 1 with the prior data intact)
    pub fn with_form(form: F) -> Self {
        Self {
            form,
            current: F::first_step(),
            errors: FieldErrors::new(),
        }
    }

    /// The step currently shown
    pub fn current_step(&self) -> F::Step {
        self.current
    }

    /// 1-based index of the current step
    pub fn step_index(&self) -> usize {
        F::index_of(self.current)
    }

    /// True on the terminal review step
    pub fn is_review(&self) -> bool {
        self.current == F::review_step()
    }

    /// Read access to the form record
    pub fn form(&self) -> &F {
        &self.form
    }

    /// Mutable access to the form record; all field edits flow through here
    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Errors from the most recent blocked advance
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Validates the current step and moves forward on success
    ///
    /// On failure the wizard stays put and the returned error carries
    /// exactly the validator's output.
    pub fn advance(&mut self) -> Result<F::Step, WizardError> {
        if self.is_review() {
            return Err(WizardError::AtReview);
        }

        let errors = self.form.validate(self.current);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(WizardError::StepBlocked { errors });
        }

        self.errors = FieldErrors::new();
        let next_index = F::index_of(self.current) + 1;
        // In range by construction: current is not the review step
        if let Some(next) = F::step_at(next_index) {
            self.current = next;
        }
        Ok(self.current)
    }

    /// Moves backward unconditionally; stays put on the first step
    pub fn retreat(&mut self) -> F::Step {
        let index = F::index_of(self.current);
        if index > 1 {
            if let Some(prev) = F::step_at(index - 1) {
                self.current = prev;
                self.errors = FieldErrors::new();
            }
        }
        self.current
    }

    /// Jumps to an earlier step for correction; only offered from review
    pub fn jump_to(&mut self, step: F::Step) -> Result<(), WizardError> {
        if !self.is_review() {
            return Err(WizardError::JumpNotAllowed);
        }
        self.current = step;
        self.errors = FieldErrors::new();
        Ok(())
    }

    /// Consumes the wizard, releasing the form record (used on submission;
    /// the record is discarded once submission succeeds)
    pub fn into_form(self) -> F {
        self.form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_kyc::form::{AccountType, AnnualIncomeBand, Gender, Occupation, RiskAppetite};

    fn fill_personal(form: &mut InvestorKycForm) {
        form.personal.full_name = "Asha Rao".to_string();
        form.personal.email = "asha@example.com".to_string();
        form.set_mobile("9876543210");
        form.personal.date_of_birth = "1990-03-14".to_string();
        form.personal.gender = Some(Gender::Female);
        form.set_pan("ABCDE1234F");
        form.set_aadhaar("123456789012");
    }

    fn fill_addresses(form: &mut InvestorKycForm) {
        form.resident_address.line1 = "12 MG Road".to_string();
        form.resident_address.city = "Bengaluru".to_string();
        form.resident_address.state = "Karnataka".to_string();
        form.resident_address.set_pincode("560001");
        form.set_same_as_permanent(true);
    }

    fn fill_bank(form: &mut InvestorKycForm) {
        form.bank.account_holder_name = "Asha Rao".to_string();
        form.bank.bank_name = "HDFC Bank".to_string();
        form.set_account_number("1234567890");
        form.set_confirm_account_number("1234567890");
        form.set_ifsc_code("HDFC0001234");
        form.bank.account_type = Some(AccountType::Savings);
    }

    fn fill_income(form: &mut InvestorKycForm) {
        form.income.annual_income = Some(AnnualIncomeBand::TenToTwentyFive);
        form.income.occupation = Some(Occupation::Salaried);
        form.income.source_of_funds = vec!["Salary".to_string()];
        form.income.risk_appetite = Some(RiskAppetite::Medium);
    }

    #[test]
    fn test_wizard_starts_at_step_one() {
        let wizard = Wizard::<InvestorKycForm>::start();
        assert_eq!(wizard.current_step(), InvestorStep::Personal);
        assert_eq!(wizard.step_index(), 1);
        assert!(!wizard.is_review());
    }

    #[test]
    fn test_advance_blocked_with_exact_validator_output() {
        let mut wizard = Wizard::<InvestorKycForm>::start();
        let expected = wizard.form().validate(InvestorStep::Personal);

        match wizard.advance() {
            Err(WizardError::StepBlocked { errors }) => {
                assert_eq!(errors, expected);
                assert_eq!(wizard.errors(), &expected);
            }
            other => panic!("expected StepBlocked, got {other:?}"),
        }
        // Step unchanged
        assert_eq!(wizard.current_step(), InvestorStep::Personal);
    }

    #[test]
    fn test_advance_succeeds_when_step_valid() {
        let mut wizard = Wizard::<InvestorKycForm>::start();
        fill_personal(wizard.form_mut());
        let next = wizard.advance().unwrap();
        assert_eq!(next, InvestorStep::Address);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_retreat_is_unconditional_and_keeps_data() {
        let mut wizard = Wizard::<InvestorKycForm>::start();
        fill_personal(wizard.form_mut());
        wizard.advance().unwrap();

        // Address step is invalid, yet retreat works
        let step = wizard.retreat();
        assert_eq!(step, InvestorStep::Personal);
        assert_eq!(wizard.form().personal.full_name, "Asha Rao");

        // At step 1 retreat stays put
        assert_eq!(wizard.retreat(), InvestorStep::Personal);
    }

    #[test]
    fn test_full_walk_to_review() {
        let mut wizard = Wizard::<InvestorKycForm>::start();
        fill_personal(wizard.form_mut());
        wizard.advance().unwrap();
        fill_addresses(wizard.form_mut());
        wizard.advance().unwrap();
        fill_bank(wizard.form_mut());
        wizard.advance().unwrap();
        fill_income(wizard.form_mut());
        wizard.advance().unwrap();
        wizard.form_mut().selfie_image = Some("data:image/png;base64,AA".to_string());
        wizard.advance().unwrap();

        assert!(wizard.is_review());
        assert_eq!(wizard.step_index(), InvestorKycForm::STEP_COUNT);

        // Review is terminal for advance()
        assert!(matches!(wizard.advance(), Err(WizardError::AtReview)));
    }

    #[test]
    fn test_jump_only_from_review() {
        let mut wizard = Wizard::<InvestorKycForm>::start();
        assert!(matches!(
            wizard.jump_to(InvestorStep::Bank),
            Err(WizardError::JumpNotAllowed)
        ));

        fill_personal(wizard.form_mut());
        wizard.advance().unwrap();
        fill_addresses(wizard.form_mut());
        wizard.advance().unwrap();
        fill_bank(wizard.form_mut());
        wizard.advance().unwrap();
        fill_income(wizard.form_mut());
        wizard.advance().unwrap();
        wizard.form_mut().selfie_image = Some("data:image/png;base64,AA".to_string());
        wizard.advance().unwrap();
        assert!(wizard.is_review());

        wizard.jump_to(InvestorStep::Bank).unwrap();
        assert_eq!(wizard.current_step(), InvestorStep::Bank);
    }

    #[test]
    fn test_builder_flow_sequencing() {
        let mut wizard = Wizard::<BuilderKycForm>::start();
        assert_eq!(wizard.current_step(), BuilderStep::Company);

        let form = wizard.form_mut();
        form.company.company_name = "Skyline Estates Pvt Ltd".to_string();
        form.company.business_type = Some(domain_kyc::BusinessType::PrivateLimited);
        form.set_year_of_establishment("2015");
        form.set_company_pan("AAACS1234L");
        form.company.official_email = "ops@skyline.example".to_string();
        form.set_official_mobile("9123456780");

        assert_eq!(wizard.advance().unwrap(), BuilderStep::Address);
    }
}
