//! Verification result codes and delivery policy rules.

use lazy_static::lazy_static;
use melissa_client::Record;
use regex::Regex;

/// Verified down to the delivery point, premise or thoroughfare.
pub const DELIVERABLE_CODES: &[&str] = &["AV25", "AV24", "AV23"];

/// Verified only down to locality/administrative area, or partially verified.
pub const PARTIAL_MATCH_PREFIXES: &[&str] = &["AV22", "AV21", "AV1"];

/// Any `AE` code is an address error.
pub const ADDRESS_ERROR_PREFIX: &str = "AE";

/// Armed Forces pseudo-states (APO/FPO/DPO).
pub const MILITARY_AREAS: &[&str] = &["AA", "AE", "AP"];

lazy_static! {
    static ref PO_BOX_REGEX: Regex = Regex::new(
        r"(?i)^\s*(p\.?\s*o\.?\s*box|post\s+office\s+box|pob)\b"
    ).unwrap();
}

/// How the first record's result codes classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeClass {
    /// Carries the first `AE` code found
    AddressError(String),
    Deliverable,
    PartialMatch,
    Unrecognized,
}

/// Classify a record. Errors win over verification codes.
pub fn classify(record: &Record) -> CodeClass {
    let codes = record.result_codes();

    if let Some(code) = codes.iter().find(|c| c.starts_with(ADDRESS_ERROR_PREFIX)) {
        return CodeClass::AddressError(code.clone());
    }
    if codes.iter().any(|c| DELIVERABLE_CODES.contains(&c.as_str())) {
        return CodeClass::Deliverable;
    }
    if codes
        .iter()
        .any(|c| PARTIAL_MATCH_PREFIXES.iter().any(|p| c.starts_with(p)))
    {
        return CodeClass::PartialMatch;
    }
    CodeClass::Unrecognized
}

/// Member-facing explanation for an `AE` code.
pub fn address_error_reason(code: &str) -> &'static str {
    match code {
        "AE01" => "The postal code could not be matched to this address",
        "AE02" => "The street could not be found",
        "AE03" => "The street, city and postal code do not match each other",
        "AE05" => "The address matches more than one location",
        "AE08" => "The apartment or suite number is not valid",
        "AE09" => "An apartment or suite number is required",
        "AE10" => "The street number is not valid",
        "AE11" => "The street number is missing",
        "AE12" => "The P.O. box number is not valid",
        "AE13" => "The P.O. box number is missing",
        "AE14" => "The private mailbox number is missing",
        "AE17" => "An apartment or suite number was given but is not used at this address",
        _ => "The address could not be verified",
    }
}

pub fn is_po_box(street: &str) -> bool {
    PO_BOX_REGEX.is_match(street)
}

pub fn is_military_area(state: &str) -> bool {
    MILITARY_AREAS
        .iter()
        .any(|area| area.eq_ignore_ascii_case(state.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(results: &str) -> Record {
        Record {
            results: results.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&record("AV25")), CodeClass::Deliverable);
        assert_eq!(classify(&record("AV23,GS05")), CodeClass::Deliverable);
        assert_eq!(classify(&record("AV22")), CodeClass::PartialMatch);
        assert_eq!(classify(&record("AV13")), CodeClass::PartialMatch);
        assert_eq!(
            classify(&record("AV24AE09")),
            CodeClass::AddressError("AE09".into())
        );
        assert_eq!(classify(&record("GS01")), CodeClass::Unrecognized);
        assert_eq!(classify(&record("")), CodeClass::Unrecognized);
    }

    #[test]
    fn test_po_box_detection() {
        assert!(is_po_box("PO Box 123"));
        assert!(is_po_box("p.o. box 9"));
        assert!(is_po_box("Post Office Box 77"));
        assert!(!is_po_box("123 Boxwood Ln"));
        assert!(!is_po_box("1 Pobox Rd"));
    }

    #[test]
    fn test_military_area() {
        assert!(is_military_area("AP"));
        assert!(is_military_area(" ae "));
        assert!(!is_military_area("NY"));
    }

    #[test]
    fn test_address_error_reason() {
        assert_eq!(
            address_error_reason("AE09"),
            "An apartment or suite number is required"
        );
        assert_eq!(address_error_reason("AE99"), "The address could not be verified");
    }
}
