//! Field formatters, normalizers, and display masks
//!
//! Normalizers run on every change, mapping raw keystroke-level input into
//! the canonical stored value before it reaches the form record. Masks are
//! display-only transformations used on the review step; they never alter
//! the stored value and never panic on short input.

/// Uppercases and strips to `[A-Z0-9]`, truncated to `max_len`
fn upper_alnum(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(max_len)
        .collect()
}

/// Keeps digits only, truncated to `max_len` (`usize::MAX` for unbounded)
fn digits(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(max_len)
        .collect()
}

/// Canonical PAN: uppercase, alphanumeric, at most 10 characters
pub fn normalize_pan(raw: &str) -> String {
    upper_alnum(raw, 10)
}

/// Canonical IFSC: uppercase, alphanumeric, at most 11 characters
pub fn normalize_ifsc(raw: &str) -> String {
    upper_alnum(raw, 11)
}

/// Canonical Aadhaar: digits only, at most 12
pub fn normalize_aadhaar(raw: &str) -> String {
    digits(raw, 12)
}

/// Canonical pincode: digits only, at most 6
pub fn normalize_pincode(raw: &str) -> String {
    digits(raw, 6)
}

/// Canonical mobile number: digits only, at most 10
pub fn normalize_mobile(raw: &str) -> String {
    digits(raw, 10)
}

/// Canonical bank account number: digits only, unbounded length
pub fn normalize_account_number(raw: &str) -> String {
    digits(raw, usize::MAX)
}

/// Canonical year of establishment: digits only, at most 4
pub fn normalize_year(raw: &str) -> String {
    digits(raw, 4)
}

/// Renders a canonical Aadhaar grouped in blocks of 4 for display
///
/// Accepts partial input; grouping applies to however many digits exist.
pub fn format_aadhaar_display(canonical: &str) -> String {
    canonical
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Masks a PAN for review display: first 2 characters + `***` + last 2
///
/// Inputs shorter than 4 characters are fully masked.
pub fn mask_pan(pan: &str) -> String {
    let chars: Vec<char> = pan.chars().collect();
    if chars.len() < 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}***{tail}")
}

/// Masks an Aadhaar for review display: `**** **** ` + last 4 digits
///
/// Inputs with fewer than 4 digits are fully masked.
pub fn mask_aadhaar(aadhaar: &str) -> String {
    let chars: Vec<char> = aadhaar.chars().collect();
    if chars.len() < 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("**** **** {tail}")
}

/// Masks a bank account number for review display: `****` + last 4 digits
///
/// Inputs with fewer than 5 digits are fully masked.
pub fn mask_account_number(account: &str) -> String {
    let chars: Vec<char> = account.chars().collect();
    if chars.len() < 5 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
