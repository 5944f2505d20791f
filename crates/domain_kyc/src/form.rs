//! KYC form records
//!
//! A form record is the single mutable state behind a wizard: created empty
//! when the wizard starts, owned exclusively by the wizard while it is
//! active, and discarded once submission succeeds. Field values survive step
//! navigation; nothing is dropped on retreat.
//!
//! Setters for formatted fields run the corresponding normalizer from
//! [`crate::format`] on every change, so the stored value is always
//! canonical. The address copy-down is a one-time snapshot, not a live
//! binding: while the toggle is on, the dependent address accepts no
//! independent edits.

use serde::{Deserialize, Serialize};

use crate::format::{
    normalize_aadhaar, normalize_account_number, normalize_ifsc, normalize_mobile, normalize_pan,
    normalize_pincode, normalize_year,
};

/// Gender options on the personal details step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Bank account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Savings,
    Current,
}

/// Annual income band, in lakhs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnualIncomeBand {
    #[serde(rename = "below_5")]
    Below5,
    #[serde(rename = "5_10")]
    FiveToTen,
    #[serde(rename = "10_25")]
    TenToTwentyFive,
    #[serde(rename = "above_25")]
    Above25,
}

/// Occupation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Salaried,
    SelfEmployed,
    BusinessOwner,
    Retired,
    Other,
}

/// Investor risk appetite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAppetite {
    Low,
    Medium,
    High,
}

/// Builder business structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Individual,
    Partnership,
    PrivateLimited,
    Llp,
}

/// One address group as captured on the address steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressFields {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    /// Fixed to "India" on the current forms
    pub country: String,
    pub pincode: String,
}

impl Default for AddressFields {
    fn default() -> Self {
        Self {
            line1: String::new(),
            line2: String::new(),
            city: String::new(),
            state: String::new(),
            country: "India".to_string(),
            pincode: String::new(),
        }
    }
}

impl AddressFields {
    /// Stores a pincode, normalized to at most 6 digits
    pub fn set_pincode(&mut self, raw: &str) {
        self.pincode = normalize_pincode(raw);
    }
}

/// Personal details step (investor)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    /// Raw date input as entered, validated for presence only
    pub date_of_birth: String,
    pub gender: Option<Gender>,
    pub pan: String,
    pub aadhaar: String,
}

/// Bank details step (investor)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankDetails {
    pub account_holder_name: String,
    pub bank_name: String,
    pub account_number: String,
    pub confirm_account_number: String,
    pub ifsc_code: String,
    pub account_type: Option<AccountType>,
    pub upi_id: String,
}

/// Income profile step (investor)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub annual_income: Option<AnnualIncomeBand>,
    pub occupation: Option<Occupation>,
    /// Free-form multi-select labels
    pub source_of_funds: Vec<String>,
    pub risk_appetite: Option<RiskAppetite>,
}

/// The investor KYC form record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestorKycForm {
    pub personal: PersonalDetails,
    pub resident_address: AddressFields,
    pub permanent_address: AddressFields,
    /// One-way copy-down toggle: resident -> permanent
    pub same_as_permanent: bool,
    pub bank: BankDetails,
    pub income: IncomeProfile,
    /// Data-URL captured from camera or uploaded file
    pub selfie_image: Option<String>,
    pub declaration_accepted: bool,
}

impl InvestorKycForm {
    /// Creates an empty form, as on wizard mount
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a PAN keystroke, normalized
    pub fn set_pan(&mut self, raw: &str) {
        self.personal.pan = normalize_pan(raw);
    }

    /// Stores an Aadhaar keystroke, normalized to digits
    pub fn set_aadhaar(&mut self, raw: &str) {
        self.personal.aadhaar = normalize_aadhaar(raw);
    }

    /// Stores a mobile keystroke, normalized to digits
    pub fn set_mobile(&mut self, raw: &str) {
        self.personal.mobile = normalize_mobile(raw);
    }

    /// Stores an IFSC keystroke, normalized
    pub fn set_ifsc_code(&mut self, raw: &str) {
        self.bank.ifsc_code = normalize_ifsc(raw);
    }

    /// Stores an account number keystroke, digits only
    pub fn set_account_number(&mut self, raw: &str) {
        self.bank.account_number = normalize_account_number(raw);
    }

    /// Stores the confirmation account number keystroke, digits only
    pub fn set_confirm_account_number(&mut self, raw: &str) {
        self.bank.confirm_account_number = normalize_account_number(raw);
    }

    /// Toggles the permanent-address copy-down
    ///
    /// Turning the toggle on snapshots the resident address into the
    /// permanent address at this moment. Later edits to the resident address
    /// do not propagate; toggling off and on again takes a fresh snapshot.
    pub fn set_same_as_permanent(&mut self, flag: bool) {
        if flag {
            self.permanent_address = self.resident_address.clone();
        }
        self.same_as_permanent = flag;
    }

    /// Mutable access to the permanent address, unless the copy-down toggle
    /// is on (the dependent group is read-only while mirrored)
    pub fn permanent_address_mut(&mut self) -> Option<&mut AddressFields> {
        if self.same_as_permanent {
            None
        } else {
            Some(&mut self.permanent_address)
        }
    }
}

/// Company details step (builder)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub company_name: String,
    pub business_type: Option<BusinessType>,
    pub year_of_establishment: String,
    pub company_pan: String,
    /// Optional
    pub gst_number: String,
    pub official_email: String,
    pub official_mobile: String,
}

/// Uploaded document handles for the builder documents step
///
/// Each value is the uploaded-file name/handle, not file content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentUploads {
    pub company_pan_file: Option<String>,
    pub gst_certificate_file: Option<String>,
    pub cin_llpin_file: Option<String>,
    pub rera_number: String,
    pub rera_certificate_file: Option<String>,
}

/// Bank details step (builder)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuilderBankDetails {
    pub account_holder_name: String,
    pub bank_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub cancelled_cheque_file: Option<String>,
}

/// Authorized person step (builder)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizedPerson {
    pub name: String,
    pub designation: String,
    pub mobile: String,
    pub email: String,
    pub pan: String,
    pub id_proof_file: Option<String>,
    pub selfie_with_id_file: Option<String>,
}

/// The builder KYC form record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuilderKycForm {
    pub company: CompanyDetails,
    pub registered_address: AddressFields,
    pub site_office_address: AddressFields,
    /// One-way copy-down toggle: registered -> site office
    pub same_as_site_office: bool,
    pub documents: DocumentUploads,
    pub bank: BuilderBankDetails,
    pub authorized_person: AuthorizedPerson,
    pub declaration_accepted: bool,
}

impl BuilderKycForm {
    /// Creates an empty form, as on wizard mount
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a company PAN keystroke, normalized
    pub fn set_company_pan(&mut self, raw: &str) {
        self.company.company_pan = normalize_pan(raw);
    }

    /// Stores the year of establishment, normalized to at most 4 digits
    pub fn set_year_of_establishment(&mut self, raw: &str) {
        self.company.year_of_establishment = normalize_year(raw);
    }

    /// Stores the official mobile, digits only
    pub fn set_official_mobile(&mut self, raw: &str) {
        self.company.official_mobile = normalize_mobile(raw);
    }

    /// Stores an IFSC keystroke, normalized
    pub fn set_ifsc_code(&mut self, raw: &str) {
        self.bank.ifsc_code = normalize_ifsc(raw);
    }

    /// Stores an account number keystroke, digits only
    pub fn set_account_number(&mut self, raw: &str) {
        self.bank.account_number = normalize_account_number(raw);
    }

    /// Stores the authorized person's PAN keystroke, normalized
    pub fn set_auth_person_pan(&mut self, raw: &str) {
        self.authorized_person.pan = normalize_pan(raw);
    }

    /// Stores the authorized person's mobile, digits only
    pub fn set_auth_person_mobile(&mut self, raw: &str) {
        self.authorized_person.mobile = normalize_mobile(raw);
    }

    /// Toggles the site-office copy-down (registered -> site office snapshot)
    pub fn set_same_as_site_office(&mut self, flag: bool) {
        if flag {
            self.site_office_address = self.registered_address.clone();
        }
        self.same_as_site_office = flag;
    }

    /// Mutable access to the site office address, unless mirrored
    pub fn site_office_address_mut(&mut self) -> Option<&mut AddressFields> {
        if self.same_as_site_office {
            None
        } else {
            Some(&mut self.site_office_address)
        }
    }
}
