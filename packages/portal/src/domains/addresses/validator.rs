//! Address verification against the external service.

use melissa_client::Record;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::codes::{address_error_reason, classify, is_military_area, is_po_box, CodeClass};
use crate::common::utils::{clean_text, humanize_field};
use crate::common::{Address, AddressKind};
use crate::kernel::BaseAddressVerifier;

pub const SERVICE_UNAVAILABLE: &str = "Address verification service is unavailable";

/// Classification of one verification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ValidationResult {
    /// Deliverable as entered or after normalization.
    /// `is_different` flags a non-blocking suggestion.
    #[serde(rename_all = "camelCase")]
    Deliverable {
        normalized: Address,
        is_different: bool,
    },
    /// Partial match; the member must accept or decline `suggested`.
    CorrectionAvailable { original: Address, suggested: Address },
    Undeliverable { reason: String },
    ServiceError { message: String },
}

impl ValidationResult {
    pub fn tag(&self) -> &'static str {
        match self {
            ValidationResult::Deliverable { .. } => "deliverable",
            ValidationResult::CorrectionAvailable { .. } => "correctionAvailable",
            ValidationResult::Undeliverable { .. } => "undeliverable",
            ValidationResult::ServiceError { .. } => "serviceError",
        }
    }

    pub fn is_deliverable(&self) -> bool {
        matches!(self, ValidationResult::Deliverable { .. })
    }
}

/// Verifies addresses and classifies the outcome. Never returns an error:
/// transport and parse failures become [`ValidationResult::ServiceError`].
#[derive(Clone)]
pub struct AddressValidator {
    verifier: Arc<dyn BaseAddressVerifier>,
}

impl AddressValidator {
    pub fn new(verifier: Arc<dyn BaseAddressVerifier>) -> Self {
        Self { verifier }
    }

    pub async fn validate(&self, address: &Address, kind: AddressKind) -> ValidationResult {
        let missing = address.missing_required();
        if !missing.is_empty() {
            let fields = missing
                .iter()
                .map(|suffix| humanize_field(suffix).to_lowercase())
                .collect::<Vec<_>>()
                .join(", ");
            debug!(kind = %kind, missing = %fields, "Skipping verification of incomplete address");
            return ValidationResult::Undeliverable {
                reason: format!("Address is incomplete: missing {}", fields),
            };
        }

        let input = address.cleaned();
        let response = match self.verifier.verify(&input).await {
            Ok(response) => response,
            Err(e) => {
                warn!(kind = %kind, error = %e, "Address verification request failed");
                return ValidationResult::ServiceError {
                    message: SERVICE_UNAVAILABLE.to_string(),
                };
            }
        };

        if let Some(err) = response.transmission_error() {
            warn!(kind = %kind, code = %err.code, "Address verification rejected the request");
            return ValidationResult::ServiceError {
                message: err.message,
            };
        }

        let Some(record) = response.first_record() else {
            warn!(kind = %kind, "Address verification returned no records");
            return ValidationResult::ServiceError {
                message: "Address verification returned no result".to_string(),
            };
        };

        let result = match classify(record) {
            CodeClass::AddressError(code) => ValidationResult::Undeliverable {
                reason: address_error_reason(&code).to_string(),
            },
            CodeClass::Deliverable => {
                let normalized = normalized_address(record, &input);
                match policy_violation(&normalized, kind) {
                    Some(reason) => ValidationResult::Undeliverable { reason },
                    None => ValidationResult::Deliverable {
                        is_different: normalized.differs_from(&input),
                        normalized,
                    },
                }
            }
            CodeClass::PartialMatch => match candidate_address(record, &input) {
                Some(suggested) => match policy_violation(&suggested, kind) {
                    Some(reason) => {
                        info!(kind = %kind, reason = %reason, "Suggested address not accepted");
                        ValidationResult::Undeliverable { reason }
                    }
                    // Nothing to correct; the service only reported a weak match
                    None if !suggested.differs_from(&input) => ValidationResult::Deliverable {
                        normalized: suggested,
                        is_different: false,
                    },
                    None => ValidationResult::CorrectionAvailable {
                        original: input.clone(),
                        suggested,
                    },
                },
                None => ValidationResult::Undeliverable {
                    reason: "Only part of the address could be matched".to_string(),
                },
            },
            CodeClass::Unrecognized => ValidationResult::ServiceError {
                message: format!("Unrecognized verification result '{}'", record.results),
            },
        };

        info!(
            kind = %kind,
            result = result.tag(),
            codes = %record.results,
            "Address verified"
        );
        result
    }
}

/// The service's rendering of the address, falling back to input for blank fields.
fn normalized_address(record: &Record, input: &Address) -> Address {
    let pick = |service: &str, entered: &str| {
        let service = clean_text(service);
        if service.is_empty() {
            entered.to_string()
        } else {
            service
        }
    };

    Address {
        street: pick(&record.address_line1, &input.street),
        city: pick(&record.locality, &input.city),
        state: pick(&record.administrative_area, &input.state),
        postal_code: pick(&record.postal_code, &input.postal_code),
        country: pick(&record.country, &input.country),
    }
}

/// A full suggested address, only if the record names every required component.
fn candidate_address(record: &Record, input: &Address) -> Option<Address> {
    let mut candidate = Address {
        street: clean_text(&record.address_line1),
        city: clean_text(&record.locality),
        state: clean_text(&record.administrative_area),
        postal_code: clean_text(&record.postal_code),
        country: clean_text(&record.country),
    };

    let complete = [
        &candidate.street,
        &candidate.city,
        &candidate.state,
        &candidate.postal_code,
    ]
    .iter()
    .all(|value| !value.is_empty());

    if !complete {
        return None;
    }

    if candidate.country.is_empty() {
        candidate.country = input.country.clone();
    }
    Some(candidate)
}

fn policy_violation(address: &Address, kind: AddressKind) -> Option<String> {
    if !kind.allows_po_box() && is_po_box(&address.street) {
        return Some(format!("P.O. boxes cannot be used as a {} address", kind));
    }
    if is_military_area(&address.state) {
        return Some("Military (APO/FPO/DPO) addresses are not accepted".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_address_falls_back_to_input() {
        let input = Address::new("123 Main St", "New York", "NY", "10001", "US");
        let record = Record {
            results: "AV25".into(),
            address_line1: "123 MAIN ST".into(),
            postal_code: "10001-2345".into(),
            ..Default::default()
        };

        let normalized = normalized_address(&record, &input);
        assert_eq!(normalized.street, "123 MAIN ST");
        assert_eq!(normalized.city, "New York");
        assert_eq!(normalized.postal_code, "10001-2345");
    }

    #[test]
    fn test_candidate_requires_every_component() {
        let input = Address::new("12 Elm", "Springfield", "IL", "62701", "US");
        let partial = Record {
            results: "AV22".into(),
            locality: "Springfield".into(),
            administrative_area: "IL".into(),
            ..Default::default()
        };
        assert!(candidate_address(&partial, &input).is_none());

        let full = Record {
            address_line1: "12 Elm St".into(),
            postal_code: "62701-1111".into(),
            ..partial
        };
        let suggested = candidate_address(&full, &input).unwrap();
        assert_eq!(suggested.street, "12 Elm St");
        assert_eq!(suggested.country, "US");
    }

    #[test]
    fn test_policy_by_address_kind() {
        let po_box = Address::new("PO Box 12", "Scottsdale", "AZ", "85251", "US");
        assert!(policy_violation(&po_box, AddressKind::Home).is_some());
        assert!(policy_violation(&po_box, AddressKind::Mailing).is_none());

        let apo = Address::new("Unit 2050 Box 4190", "APO", "AP", "96278", "US");
        assert!(policy_violation(&apo, AddressKind::Mailing).is_some());
    }

    #[test]
    fn test_result_serializes_with_status_tag() {
        let result = ValidationResult::Deliverable {
            normalized: Address::new("1 A St", "B", "CA", "90001", "US"),
            is_different: true,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "deliverable");
        assert_eq!(json["isDifferent"], true);
        assert_eq!(json["normalized"]["postalCode"], "90001");
    }
}
