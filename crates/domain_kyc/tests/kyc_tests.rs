//! Comprehensive tests for domain_kyc

use domain_kyc::form::{
    AccountType, AnnualIncomeBand, BuilderKycForm, BusinessType, Gender, InvestorKycForm,
    Occupation, RiskAppetite,
};
use domain_kyc::format::{
    format_aadhaar_display, mask_aadhaar, mask_account_number, mask_pan, normalize_pan,
};
use domain_kyc::{
    validate_builder_step, validate_investor_step, BuilderStep, InvestorStep, KycStatus,
    RemoteKycStatus,
};

fn filled_investor_form() -> InvestorKycForm {
    let mut form = InvestorKycForm::new();
    form.personal.full_name = "Asha Rao".to_string();
    form.personal.email = "asha@example.com".to_string();
    form.set_mobile("98765 43210");
    form.personal.date_of_birth = "1990-03-14".to_string();
    form.personal.gender = Some(Gender::Female);
    form.set_pan("abcde1234f");
    form.set_aadhaar("1234-5678-9012");

    form.resident_address.line1 = "12 MG Road".to_string();
    form.resident_address.city = "Bengaluru".to_string();
    form.resident_address.state = "Karnataka".to_string();
    form.resident_address.set_pincode("560001");
    form.set_same_as_permanent(true);

    form.bank.account_holder_name = "Asha Rao".to_string();
    form.bank.bank_name = "HDFC Bank".to_string();
    form.set_account_number("1234567890");
    form.set_confirm_account_number("1234567890");
    form.set_ifsc_code("hdfc0001234");
    form.bank.account_type = Some(AccountType::Savings);

    form.income.annual_income = Some(AnnualIncomeBand::TenToTwentyFive);
    form.income.occupation = Some(Occupation::Salaried);
    form.income.source_of_funds = vec!["Salary".to_string()];
    form.income.risk_appetite = Some(RiskAppetite::Medium);

    form.selfie_image = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
    form.declaration_accepted = true;
    form
}

fn filled_builder_form() -> BuilderKycForm {
    let mut form = BuilderKycForm::new();
    form.company.company_name = "Skyline Estates Pvt Ltd".to_string();
    form.company.business_type = Some(BusinessType::PrivateLimited);
    form.set_year_of_establishment("2015");
    form.set_company_pan("aaacs1234l");
    form.company.official_email = "ops@skyline.example".to_string();
    form.set_official_mobile("9123456780");

    form.registered_address.line1 = "4 Residency Road".to_string();
    form.registered_address.city = "Bengaluru".to_string();
    form.registered_address.state = "Karnataka".to_string();
    form.registered_address.set_pincode("560025");
    form.set_same_as_site_office(true);

    form.documents.company_pan_file = Some("company_pan.pdf".to_string());
    form.documents.rera_number = "PRM/KA/RERA/1251/446".to_string();
    form.documents.rera_certificate_file = Some("rera.pdf".to_string());

    form.bank.account_holder_name = "Skyline Estates Pvt Ltd".to_string();
    form.bank.bank_name = "ICICI Bank".to_string();
    form.set_account_number("000405001234");
    form.set_ifsc_code("icic0000004");
    form.bank.cancelled_cheque_file = Some("cheque.pdf".to_string());

    form.authorized_person.name = "R. Iyer".to_string();
    form.authorized_person.designation = "Director".to_string();
    form.set_auth_person_mobile("9988776655");
    form.authorized_person.email = "iyer@skyline.example".to_string();
    form.set_auth_person_pan("avqpi5678k");
    form.authorized_person.id_proof_file = Some("id_proof.pdf".to_string());

    form.declaration_accepted = true;
    form
}

// ============================================================================
// Full-flow validation
// ============================================================================

mod flow_tests {
    use super::*;

    #[test]
    fn test_filled_investor_form_passes_every_step() {
        let form = filled_investor_form();
        for step in InvestorStep::ALL {
            let errors = validate_investor_step(step, &form);
            assert!(
                errors.is_empty(),
                "step {step:?} failed: {}",
                errors.summary()
            );
        }
    }

    #[test]
    fn test_filled_builder_form_passes_every_step() {
        let form = filled_builder_form();
        for step in BuilderStep::ALL {
            let errors = validate_builder_step(step, &form);
            assert!(
                errors.is_empty(),
                "step {step:?} failed: {}",
                errors.summary()
            );
        }
    }

    #[test]
    fn test_normalizing_setters_feed_the_validators() {
        // Raw user input with noise still validates after setter normalization
        let form = filled_investor_form();
        assert_eq!(form.personal.pan, "ABCDE1234F");
        assert_eq!(form.personal.aadhaar, "123456789012");
        assert_eq!(form.personal.mobile, "9876543210");
        assert_eq!(form.bank.ifsc_code, "HDFC0001234");
    }

    #[test]
    fn test_copy_down_snapshot_is_not_a_live_binding() {
        let mut form = filled_investor_form();
        assert_eq!(form.permanent_address.line1, "12 MG Road");

        // Editing the source after the snapshot does not propagate
        form.resident_address.line1 = "99 Brigade Road".to_string();
        assert_eq!(form.permanent_address.line1, "12 MG Road");

        // While mirrored the permanent group is not directly editable
        assert!(form.permanent_address_mut().is_none());

        // Toggling off re-enables direct edits
        form.set_same_as_permanent(false);
        assert!(form.permanent_address_mut().is_some());
    }

    #[test]
    fn test_edited_field_revalidates_against_same_step() {
        let mut form = filled_investor_form();
        form.set_pan("ABC");
        let errors = validate_investor_step(InvestorStep::Personal, &form);
        assert_eq!(errors.get("pan"), Some("Invalid PAN format"));

        form.set_pan("ABCDE1234F");
        let errors = validate_investor_step(InvestorStep::Personal, &form);
        assert!(errors.is_empty());
    }
}

// ============================================================================
// Formatting and masking
// ============================================================================

mod format_tests {
    use super::*;

    #[test]
    fn test_display_formatting() {
        assert_eq!(format_aadhaar_display("123456789012"), "1234 5678 9012");
        assert_eq!(normalize_pan(" abcde1234f "), "ABCDE1234F");
    }

    #[test]
    fn test_masks_reveal_only_the_allowed_window() {
        assert_eq!(mask_pan("ABCDE1234F"), "AB***4F");
        assert_eq!(mask_aadhaar("123456789012"), "**** **** 9012");
        assert_eq!(mask_account_number("1234567890"), "****7890");
    }

    #[test]
    fn test_masks_tolerate_short_input() {
        // Short values never panic and never reveal anything
        assert!(mask_pan("AB").chars().all(|c| c == '*'));
        assert!(mask_aadhaar("12").chars().all(|c| c == '*'));
        assert!(mask_account_number("1234").chars().all(|c| c == '*'));
    }
}

// ============================================================================
// Status lifecycle
// ============================================================================

mod status_tests {
    use super::*;

    #[test]
    fn test_lifecycle_is_monotonic_once_approved() {
        let approved = KycStatus::Approved;
        for next in [
            KycStatus::NotStarted,
            KycStatus::InProgress,
            KycStatus::Pending,
            KycStatus::Rejected,
        ] {
            assert!(!approved.can_transition_to(next), "approved -> {next} must be forbidden");
        }
        assert!(approved.can_transition_to(KycStatus::Approved));
    }

    #[test]
    fn test_rejection_reopens_only_into_the_wizard() {
        let rejected = KycStatus::Rejected;
        assert!(rejected.can_transition_to(KycStatus::InProgress));
        assert!(!rejected.can_transition_to(KycStatus::Approved));
        assert!(!rejected.can_transition_to(KycStatus::Pending));
    }

    #[test]
    fn test_remote_vocabulary_maps_onto_local() {
        assert_eq!(RemoteKycStatus::Pending.to_local(), KycStatus::Pending);
        assert_eq!(RemoteKycStatus::Verified.to_local(), KycStatus::Approved);
        assert_eq!(RemoteKycStatus::Rejected.to_local(), KycStatus::Rejected);
    }

    #[test]
    fn test_status_wire_casing() {
        let json = serde_json::to_string(&KycStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let json = serde_json::to_string(&RemoteKycStatus::Verified).unwrap();
        assert_eq!(json, "\"VERIFIED\"");
    }
}

// ============================================================================
// Wire shapes
// ============================================================================

mod wire_tests {
    use super::*;

    #[test]
    fn test_income_band_wire_values() {
        let json = serde_json::to_string(&AnnualIncomeBand::Below5).unwrap();
        assert_eq!(json, "\"below_5\"");
        let json = serde_json::to_string(&AnnualIncomeBand::Above25).unwrap();
        assert_eq!(json, "\"above_25\"");
    }

    #[test]
    fn test_form_round_trips_through_json() {
        let form = filled_investor_form();
        let json = serde_json::to_string(&form).unwrap();
        let back: InvestorKycForm = serde_json::from_str(&json).unwrap();
        assert_eq!(back.personal.pan, "ABCDE1234F");
        assert!(back.same_as_permanent);
        assert!(back.declaration_accepted);
    }
}
