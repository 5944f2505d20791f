//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else. The default output of each builder passes
//! every wizard step validator.

use domain_kyc::form::{
    AccountType, AnnualIncomeBand, BuilderKycForm, BusinessType, Gender, InvestorKycForm,
    Occupation, RiskAppetite,
};

use crate::fixtures::DocumentFixtures;

/// Builder for a completely filled investor KYC form
pub struct InvestorFormBuilder {
    form: InvestorKycForm,
}

impl Default for InvestorFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvestorFormBuilder {
    /// Creates a builder whose output validates cleanly on every step
    pub fn new() -> Self {
        let mut form = InvestorKycForm::default();
        form.personal.full_name = "Asha Rao".to_string();
        form.personal.email = "asha@example.com".to_string();
        form.set_mobile(DocumentFixtures::mobile());
        form.personal.date_of_birth = "1990-03-14".to_string();
        form.personal.gender = Some(Gender::Female);
        form.set_pan(DocumentFixtures::pan());
        form.set_aadhaar(DocumentFixtures::aadhaar());

        form.resident_address.line1 = "12 MG Road".to_string();
        form.resident_address.city = "Bengaluru".to_string();
        form.resident_address.state = "Karnataka".to_string();
        form.resident_address.set_pincode(DocumentFixtures::pincode());
        form.set_same_as_permanent(true);

        form.bank.account_holder_name = "Asha Rao".to_string();
        form.bank.bank_name = "HDFC Bank".to_string();
        form.set_account_number("1234567890");
        form.set_confirm_account_number("1234567890");
        form.set_ifsc_code(DocumentFixtures::ifsc());
        form.bank.account_type = Some(AccountType::Savings);

        form.income.annual_income = Some(AnnualIncomeBand::TenToTwentyFive);
        form.income.occupation = Some(Occupation::Salaried);
        form.income.source_of_funds = vec!["Salary".to_string()];
        form.income.risk_appetite = Some(RiskAppetite::Medium);

        form.selfie_image = Some(DocumentFixtures::selfie_data_url().to_string());
        form.declaration_accepted = true;
        Self { form }
    }

    /// Sets the PAN (normalized through the form setter)
    pub fn with_pan(mut self, pan: &str) -> Self {
        self.form.set_pan(pan);
        self
    }

    /// Clears the selfie, leaving the capture step incomplete
    pub fn without_selfie(mut self) -> Self {
        self.form.selfie_image = None;
        self
    }

    /// Leaves the declaration unaccepted
    pub fn without_declaration(mut self) -> Self {
        self.form.declaration_accepted = false;
        self
    }

    /// Makes the confirmation account number disagree with the original
    pub fn with_mismatched_confirmation(mut self) -> Self {
        self.form.set_confirm_account_number("9999999999");
        self
    }

    pub fn build(self) -> InvestorKycForm {
        self.form
    }
}

/// Builder for a completely filled builder (developer) KYC form
pub struct BuilderFormBuilder {
    form: BuilderKycForm,
}

impl Default for BuilderFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderFormBuilder {
    /// Creates a builder whose output validates cleanly on every step
    pub fn new() -> Self {
        let mut form = BuilderKycForm::default();
        form.company.company_name = "Skyline Estates Pvt Ltd".to_string();
        form.company.business_type = Some(BusinessType::PrivateLimited);
        form.set_year_of_establishment("2015");
        form.set_company_pan(DocumentFixtures::company_pan());
        form.company.official_email = "ops@skyline.example".to_string();
        form.set_official_mobile("9123456780");

        form.registered_address.line1 = "4 Residency Road".to_string();
        form.registered_address.city = "Bengaluru".to_string();
        form.registered_address.state = "Karnataka".to_string();
        form.registered_address.set_pincode("560025");
        form.set_same_as_site_office(true);

        form.documents.company_pan_file = Some("company_pan.pdf".to_string());
        form.documents.cin_llpin_file = Some("cin.pdf".to_string());
        form.documents.rera_number = DocumentFixtures::rera_number().to_string();
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
        form.authorized_person.id_proof_file = Some("id_proof.pdf".to_string());
        form.authorized_person.selfie_with_id_file = Some("selfie_id.jpg".to_string());

        form.declaration_accepted = true;
        Self { form }
    }

    /// Adds a GST number, which makes the GST certificate mandatory
    pub fn with_gst(mut self, gst_number: &str) -> Self {
        self.form.company.gst_number = gst_number.to_string();
        self
    }

    /// Attaches the GST certificate upload
    pub fn with_gst_certificate(mut self) -> Self {
        self.form.documents.gst_certificate_file = Some("gst.pdf".to_string());
        self
    }

    /// Leaves the declaration unaccepted
    pub fn without_declaration(mut self) -> Self {
        self.form.declaration_accepted = false;
        self
    }

    pub fn build(self) -> BuilderKycForm {
        self.form
    }
}
