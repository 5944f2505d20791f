//! Per-step form validation
//!
//! Validators are pure functions from the in-memory form state to a map of
//! field name -> error message. No I/O happens here; every check is
//! synchronous and local.
//!
//! # Layering
//!
//! Required-field checks use trimmed non-empty tests. Format checks layer on
//! top: a missing field produces a "required" message, a present but
//! malformed field produces a "format" message, and a field never carries
//! more than one message (the first recorded message wins).

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::form::{AddressFields, BuilderKycForm, InvestorKycForm};

static PAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid PAN regex"));
static IFSC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid IFSC regex"));

/// Steps of the investor KYC wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InvestorStep {
    Personal,
    Address,
    Bank,
    Income,
    Selfie,
    Review,
}

impl InvestorStep {
    pub const ALL: [InvestorStep; 6] = [
        InvestorStep::Personal,
        InvestorStep::Address,
        InvestorStep::Bank,
        InvestorStep::Income,
        InvestorStep::Selfie,
        InvestorStep::Review,
    ];

    /// 1-based position within the wizard
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).map(|i| i + 1).unwrap_or(1)
    }

    /// Step at a 1-based position, if in range
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Steps of the builder KYC wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuilderStep {
    Company,
    Address,
    Documents,
    Bank,
    AuthorizedPerson,
    Review,
}

impl BuilderStep {
    pub const ALL: [BuilderStep; 6] = [
        BuilderStep::Company,
        BuilderStep::Address,
        BuilderStep::Documents,
        BuilderStep::Bank,
        BuilderStep::AuthorizedPerson,
        BuilderStep::Review,
    ];

    /// 1-based position within the wizard
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).map(|i| i + 1).unwrap_or(1)
    }

    /// Step at a 1-based position, if in range
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Map of field name -> error message produced by a step validator
///
/// At most one message per field: the first message recorded for a field is
/// kept and later ones are ignored, which is what lets required checks
/// short-circuit format checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Creates an empty error map
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for a field unless one is already present
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Returns the message for a field, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// True when the step may be left forward
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields carrying an error
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over (field, message) pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Joins all messages into one line, for logging and API error bodies
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Requires a trimmed non-empty value; returns true when present
fn require(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) -> bool {
    if is_blank(value) {
        errors.add(field, format!("{label} is required"));
        false
    } else {
        true
    }
}

fn require_email(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if require(errors, field, value, label) && (!value.contains('@') || !value.contains('.')) {
        errors.add(field, format!("Invalid {} format", label.to_lowercase()));
    }
}

fn require_mobile(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if require(errors, field, value, label) && value.len() != 10 {
        errors.add(field, format!("{label} must be 10 digits"));
    }
}

fn require_pan(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if require(errors, field, value, label) && !PAN_RE.is_match(value) {
        errors.add(field, format!("Invalid {label} format"));
    }
}

fn require_ifsc(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if require(errors, field, value, "IFSC code") && !IFSC_RE.is_match(value) {
        errors.add(field, "Invalid IFSC code format");
    }
}

fn require_file(errors: &mut FieldErrors, field: &'static str, value: &Option<String>, label: &str) {
    match value {
        Some(name) if !is_blank(name) => {}
        _ => errors.add(field, format!("{label} is required")),
    }
}

/// Validates one address group, prefixing field keys with the group name
fn validate_address(
    errors: &mut FieldErrors,
    address: &AddressFields,
    fields: [&'static str; 4],
) {
    let [line1, city, state, pincode] = fields;
    require(errors, line1, &address.line1, "Address line 1");
    require(errors, city, &address.city, "City");
    require(errors, state, &address.state, "State");
    if require(errors, pincode, &address.pincode, "Pincode") && address.pincode.len() != 6 {
        errors.add(pincode, "Pincode must be 6 digits");
    }
}

/// Validates one investor wizard step against the current form state
pub fn validate_investor_step(step: InvestorStep, form: &InvestorKycForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match step {
        InvestorStep::Personal => {
            require(&mut errors, "full_name", &form.personal.full_name, "Full name");
            require_email(&mut errors, "email", &form.personal.email, "Email");
            require_mobile(&mut errors, "mobile", &form.personal.mobile, "Mobile number");
            require(
                &mut errors,
                "date_of_birth",
                &form.personal.date_of_birth,
                "Date of birth",
            );
            if form.personal.gender.is_none() {
                errors.add("gender", "Gender is required");
            }
            require_pan(&mut errors, "pan", &form.personal.pan, "PAN");
            if require(&mut errors, "aadhaar", &form.personal.aadhaar, "Aadhaar number")
                && form.personal.aadhaar.len() != 12
            {
                errors.add("aadhaar", "Aadhaar must be 12 digits");
            }
        }
        InvestorStep::Address => {
            validate_address(
                &mut errors,
                &form.resident_address,
                [
                    "resident_line1",
                    "resident_city",
                    "resident_state",
                    "resident_pincode",
                ],
            );
            validate_address(
                &mut errors,
                &form.permanent_address,
                [
                    "permanent_line1",
                    "permanent_city",
                    "permanent_state",
                    "permanent_pincode",
                ],
            );
        }
        InvestorStep::Bank => {
            require(
                &mut errors,
                "account_holder_name",
                &form.bank.account_holder_name,
                "Account holder name",
            );
            require(&mut errors, "bank_name", &form.bank.bank_name, "Bank name");
            let has_account = require(
                &mut errors,
                "account_number",
                &form.bank.account_number,
                "Account number",
            );
            let has_confirm = require(
                &mut errors,
                "confirm_account_number",
                &form.bank.confirm_account_number,
                "Confirm account number",
            );
            // Cross-field check only once both are individually present
            if has_account
                && has_confirm
                && form.bank.account_number != form.bank.confirm_account_number
            {
                errors.add("confirm_account_number", "Account numbers do not match");
            }
            require_ifsc(&mut errors, "ifsc_code", &form.bank.ifsc_code);
            if form.bank.account_type.is_none() {
                errors.add("account_type", "Account type is required");
            }
        }
        InvestorStep::Income => {
            if form.income.annual_income.is_none() {
                errors.add("annual_income", "Annual income is required");
            }
            if form.income.occupation.is_none() {
                errors.add("occupation", "Occupation is required");
            }
            if form.income.source_of_funds.iter().all(|s| is_blank(s)) {
                errors.add("source_of_funds", "Select at least one source of funds");
            }
            if form.income.risk_appetite.is_none() {
                errors.add("risk_appetite", "Risk appetite is required");
            }
        }
        InvestorStep::Selfie => {
            match &form.selfie_image {
                Some(image) if !is_blank(image) => {}
                _ => errors.add("selfie_image", "Selfie is required"),
            }
        }
        InvestorStep::Review => {
            if !form.declaration_accepted {
                errors.add(
                    "declaration_accepted",
                    "You must accept the declaration to submit",
                );
            }
        }
    }
    errors
}

/// Validates one builder wizard step against the current form state
pub fn validate_builder_step(step: BuilderStep, form: &BuilderKycForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match step {
        BuilderStep::Company => {
            require(
                &mut errors,
                "company_name",
                &form.company.company_name,
                "Company name",
            );
            if form.company.business_type.is_none() {
                errors.add("business_type", "Business type is required");
            }
            if require(
                &mut errors,
                "year_of_establishment",
                &form.company.year_of_establishment,
                "Year of establishment",
            ) && form.company.year_of_establishment.len() != 4
            {
                errors.add("year_of_establishment", "Enter a 4-digit year");
            }
            require_pan(
                &mut errors,
                "company_pan",
                &form.company.company_pan,
                "Company PAN",
            );
            require_email(
                &mut errors,
                "official_email",
                &form.company.official_email,
                "Official email",
            );
            require_mobile(
                &mut errors,
                "official_mobile",
                &form.company.official_mobile,
                "Official mobile",
            );
        }
        BuilderStep::Address => {
            validate_address(
                &mut errors,
                &form.registered_address,
                [
                    "registered_line1",
                    "registered_city",
                    "registered_state",
                    "registered_pincode",
                ],
            );
            validate_address(
                &mut errors,
                &form.site_office_address,
                [
                    "site_office_line1",
                    "site_office_city",
                    "site_office_state",
                    "site_office_pincode",
                ],
            );
        }
        BuilderStep::Documents => {
            require_file(
                &mut errors,
                "company_pan_file",
                &form.documents.company_pan_file,
                "Company PAN document",
            );
            // GST certificate only becomes mandatory once a GST number is given
            if !is_blank(&form.company.gst_number) {
                require_file(
                    &mut errors,
                    "gst_certificate_file",
                    &form.documents.gst_certificate_file,
                    "GST certificate",
                );
            }
            require(
                &mut errors,
                "rera_number",
                &form.documents.rera_number,
                "RERA registration number",
            );
            require_file(
                &mut errors,
                "rera_certificate_file",
                &form.documents.rera_certificate_file,
                "RERA certificate",
            );
        }
        BuilderStep::Bank => {
            require(
                &mut errors,
                "account_holder_name",
                &form.bank.account_holder_name,
                "Account holder name",
            );
            require(&mut errors, "bank_name", &form.bank.bank_name, "Bank name");
            require(
                &mut errors,
                "account_number",
                &form.bank.account_number,
                "Account number",
            );
            require_ifsc(&mut errors, "ifsc_code", &form.bank.ifsc_code);
            require_file(
                &mut errors,
                "cancelled_cheque_file",
                &form.bank.cancelled_cheque_file,
                "Cancelled cheque",
            );
        }
        BuilderStep::AuthorizedPerson => {
            require(
                &mut errors,
                "auth_person_name",
                &form.authorized_person.name,
                "Authorized person name",
            );
            require(
                &mut errors,
                "designation",
                &form.authorized_person.designation,
                "Designation",
            );
            require_mobile(
                &mut errors,
                "auth_person_mobile",
                &form.authorized_person.mobile,
                "Mobile number",
            );
            require_email(
                &mut errors,
                "auth_person_email",
                &form.authorized_person.email,
                "Email",
            );
            require_pan(
                &mut errors,
                "auth_person_pan",
                &form.authorized_person.pan,
                "PAN",
            );
            require_file(
                &mut errors,
                "id_proof_file",
                &form.authorized_person.id_proof_file,
                "ID proof",
            );
        }
        BuilderStep::Review => {
            if !form.declaration_accepted {
                errors.add(
                    "declaration_accepted",
                    "You must accept the declaration to submit",
                );
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{AccountType, AnnualIncomeBand, Gender, Occupation, RiskAppetite};

    fn valid_personal(form: &mut InvestorKycForm) {
        form.personal.full_name = "Asha Rao".to_string();
        form.personal.email = "asha@example.com".to_string();
        form.set_mobile("9876543210");
        form.personal.date_of_birth = "1990-03-14".to_string();
        form.personal.gender = Some(Gender::Female);
        form.set_pan("abcde1234f");
        form.set_aadhaar("1234 5678 9012");
    }

    #[test]
    fn test_personal_step_valid() {
        let mut form = InvestorKycForm::new();
        valid_personal(&mut form);
        let errors = validate_investor_step(InvestorStep::Personal, &form);
        assert!(errors.is_empty(), "unexpected errors: {}", errors.summary());
    }

    #[test]
    fn test_required_before_format() {
        let form = InvestorKycForm::new();
        let errors = validate_investor_step(InvestorStep::Personal, &form);
        // Absent field carries the required message, not a format message
        assert_eq!(errors.get("pan"), Some("PAN is required"));
    }

    #[test]
    fn test_pan_format_scenario() {
        let mut form = InvestorKycForm::new();
        valid_personal(&mut form);

        // "abcde1234f" normalizes to "ABCDE1234F" and passes
        form.set_pan("abcde1234f");
        let errors = validate_investor_step(InvestorStep::Personal, &form);
        assert!(errors.get("pan").is_none());

        // Too short fails with a format message regardless of normalization
        form.set_pan("ABCDE123");
        let errors = validate_investor_step(InvestorStep::Personal, &form);
        assert_eq!(errors.get("pan"), Some("Invalid PAN format"));
    }

    #[test]
    fn test_one_message_per_field() {
        let mut form = InvestorKycForm::new();
        valid_personal(&mut form);
        form.personal.pan = String::new();
        let errors = validate_investor_step(InvestorStep::Personal, &form);
        assert_eq!(errors.iter().filter(|(f, _)| *f == "pan").count(), 1);
    }

    #[test]
    fn test_mobile_length() {
        let mut form = InvestorKycForm::new();
        valid_personal(&mut form);
        form.set_mobile("98765");
        let errors = validate_investor_step(InvestorStep::Personal, &form);
        assert_eq!(errors.get("mobile"), Some("Mobile number must be 10 digits"));
    }

    fn valid_bank(form: &mut InvestorKycForm) {
        form.bank.account_holder_name = "Asha Rao".to_string();
        form.bank.bank_name = "HDFC Bank".to_string();
        form.set_account_number("1234567890");
        form.set_confirm_account_number("1234567890");
        form.set_ifsc_code("hdfc0001234");
        form.bank.account_type = Some(AccountType::Savings);
    }

    #[test]
    fn test_bank_step_valid() {
        let mut form = InvestorKycForm::new();
        valid_bank(&mut form);
        let errors = validate_investor_step(InvestorStep::Bank, &form);
        assert!(errors.is_empty(), "unexpected errors: {}", errors.summary());
    }

    #[test]
    fn test_confirm_account_mismatch_only_flags_confirm_field() {
        let mut form = InvestorKycForm::new();
        valid_bank(&mut form);
        form.set_confirm_account_number("1234567891");

        let errors = validate_investor_step(InvestorStep::Bank, &form);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("confirm_account_number"),
            Some("Account numbers do not match")
        );
        assert!(errors.get("account_number").is_none());

        // Correcting the confirm field clears the error without disturbing others
        form.set_confirm_account_number("1234567890");
        let errors = validate_investor_step(InvestorStep::Bank, &form);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_mismatch_not_reported_until_both_present() {
        let mut form = InvestorKycForm::new();
        valid_bank(&mut form);
        form.bank.confirm_account_number = String::new();
        let errors = validate_investor_step(InvestorStep::Bank, &form);
        assert_eq!(
            errors.get("confirm_account_number"),
            Some("Confirm account number is required")
        );
    }

    #[test]
    fn test_ifsc_format() {
        let mut form = InvestorKycForm::new();
        valid_bank(&mut form);
        // Fifth character must be zero
        form.set_ifsc_code("HDFC1001234");
        let errors = validate_investor_step(InvestorStep::Bank, &form);
        assert_eq!(errors.get("ifsc_code"), Some("Invalid IFSC code format"));
    }

    #[test]
    fn test_income_step() {
        let mut form = InvestorKycForm::new();
        let errors = validate_investor_step(InvestorStep::Income, &form);
        assert_eq!(errors.len(), 4);

        form.income.annual_income = Some(AnnualIncomeBand::FiveToTen);
        form.income.occupation = Some(Occupation::Salaried);
        form.income.source_of_funds = vec!["Salary".to_string()];
        form.income.risk_appetite = Some(RiskAppetite::Medium);
        let errors = validate_investor_step(InvestorStep::Income, &form);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_selfie_step() {
        let mut form = InvestorKycForm::new();
        let errors = validate_investor_step(InvestorStep::Selfie, &form);
        assert_eq!(errors.get("selfie_image"), Some("Selfie is required"));

        form.selfie_image = Some("data:image/png;base64,iVBORw0".to_string());
        let errors = validate_investor_step(InvestorStep::Selfie, &form);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_review_requires_declaration() {
        let form = InvestorKycForm::new();
        let errors = validate_investor_step(InvestorStep::Review, &form);
        assert!(errors.get("declaration_accepted").is_some());
    }

    #[test]
    fn test_builder_company_step() {
        let mut form = BuilderKycForm::new();
        let errors = validate_builder_step(BuilderStep::Company, &form);
        assert!(errors.get("company_name").is_some());

        form.company.company_name = "Skyline Estates Pvt Ltd".to_string();
        form.company.business_type = Some(crate::form::BusinessType::PrivateLimited);
        form.set_year_of_establishment("2015");
        form.set_company_pan("AAACS1234L");
        form.company.official_email = "ops@skyline.example".to_string();
        form.set_official_mobile("9123456780");
        let errors = validate_builder_step(BuilderStep::Company, &form);
        assert!(errors.is_empty(), "unexpected errors: {}", errors.summary());
    }

    #[test]
    fn test_builder_gst_certificate_conditional() {
        let mut form = BuilderKycForm::new();
        form.documents.company_pan_file = Some("pan.pdf".to_string());
        form.documents.rera_number = "RERA-KA-1234".to_string();
        form.documents.rera_certificate_file = Some("rera.pdf".to_string());

        // No GST number: certificate not demanded
        let errors = validate_builder_step(BuilderStep::Documents, &form);
        assert!(errors.is_empty(), "unexpected errors: {}", errors.summary());

        form.company.gst_number = "29AAACS1234L1Z5".to_string();
        let errors = validate_builder_step(BuilderStep::Documents, &form);
        assert!(errors.get("gst_certificate_file").is_some());
    }

    #[test]
    fn test_step_index_round_trip() {
        for step in InvestorStep::ALL {
            assert_eq!(InvestorStep::from_index(step.index()), Some(step));
        }
        assert_eq!(InvestorStep::from_index(0), None);
        assert_eq!(InvestorStep::from_index(7), None);
        assert_eq!(BuilderStep::Review.index(), 6);
    }
}
