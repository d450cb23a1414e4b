//! Address verification classification against a mocked verification service.

mod common;

use std::sync::Arc;

use common::main_street;
use portal_core::common::{Address, AddressKind};
use portal_core::domains::addresses::{AddressValidator, ValidationResult};
use portal_core::kernel::test_dependencies::{transmission_failure, MockAddressVerifier};

fn validator(mock: MockAddressVerifier) -> (AddressValidator, Arc<MockAddressVerifier>) {
    let mock = Arc::new(mock);
    (AddressValidator::new(mock.clone()), mock)
}

#[tokio::test]
async fn identical_normalized_address_is_deliverable_without_difference() {
    let input = main_street();
    let (validator, _) = validator(MockAddressVerifier::new().with_result(&input, "AV25"));

    let result = validator.validate(&input, AddressKind::Home).await;

    assert_eq!(
        result,
        ValidationResult::Deliverable {
            normalized: input.clone(),
            is_different: false,
        }
    );
}

#[tokio::test]
async fn reformatted_street_is_deliverable_and_flagged_different() {
    let input = main_street();
    let normalized = Address {
        street: "123 MAIN STREET".into(),
        ..input.clone()
    };
    let (validator, _) = validator(MockAddressVerifier::new().with_result(&normalized, "AV25"));

    match validator.validate(&input, AddressKind::Home).await {
        ValidationResult::Deliverable {
            normalized: returned,
            is_different,
        } => {
            assert!(is_different);
            assert_eq!(returned.street, "123 MAIN STREET");
        }
        other => panic!("expected deliverable, got {:?}", other),
    }
}

#[tokio::test]
async fn case_only_differences_are_not_flagged() {
    let input = main_street();
    let upper = Address::new("123 MAIN ST", "NEW YORK", "NY", "10001", "US");
    let (validator, _) = validator(MockAddressVerifier::new().with_result(&upper, "AV24"));

    let result = validator.validate(&input, AddressKind::Home).await;
    assert!(matches!(
        result,
        ValidationResult::Deliverable {
            is_different: false,
            ..
        }
    ));
}

#[tokio::test]
async fn address_error_code_is_undeliverable() {
    let input = main_street();
    let (validator, _) = validator(MockAddressVerifier::new().with_result(&input, "AE09"));

    let result = validator.validate(&input, AddressKind::Home).await;
    assert_eq!(
        result,
        ValidationResult::Undeliverable {
            reason: "An apartment or suite number is required".into(),
        }
    );
}

#[tokio::test]
async fn invalid_key_transmission_code_is_service_error() {
    let (validator, _) = validator(MockAddressVerifier::new().with_response(transmission_failure("GE08")));

    match validator.validate(&main_street(), AddressKind::Home).await {
        ValidationResult::ServiceError { message } => {
            assert!(message.contains("Invalid API key"), "message was {}", message)
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn transport_failure_fails_closed() {
    let (validator, _) = validator(MockAddressVerifier::new().with_error("connection reset"));

    let result = validator.validate(&main_street(), AddressKind::Home).await;
    assert_eq!(
        result,
        ValidationResult::ServiceError {
            message: "Address verification service is unavailable".into(),
        }
    );
}

#[tokio::test]
async fn empty_record_set_is_service_error() {
    let (validator, _) = validator(MockAddressVerifier::new().with_response(transmission_failure("GE00")));

    let result = validator.validate(&main_street(), AddressKind::Home).await;
    assert_eq!(result.tag(), "serviceError");
}

#[tokio::test]
async fn unrecognized_codes_are_service_error() {
    let input = main_street();
    let (validator, _) = validator(MockAddressVerifier::new().with_result(&input, "GS01"));

    let result = validator.validate(&input, AddressKind::Home).await;
    assert_eq!(result.tag(), "serviceError");
}

#[tokio::test]
async fn partial_match_with_full_candidate_offers_correction() {
    let input = Address::new("123 Main", "New York", "NY", "10001", "US");
    let suggested = Address::new("123 Main St", "New York", "NY", "10001-2345", "US");
    let (validator, _) = validator(MockAddressVerifier::new().with_result(&suggested, "AV22"));

    let result = validator.validate(&input, AddressKind::Home).await;
    assert_eq!(
        result,
        ValidationResult::CorrectionAvailable {
            original: input,
            suggested,
        }
    );
}

#[tokio::test]
async fn partial_match_without_street_is_undeliverable() {
    let input = main_street();
    let locality_only = Address::new("", "New York", "NY", "", "US");
    let (validator, _) = validator(MockAddressVerifier::new().with_result(&locality_only, "AV21"));

    let result = validator.validate(&input, AddressKind::Home).await;
    assert_eq!(result.tag(), "undeliverable");
}

#[tokio::test]
async fn incomplete_address_never_reaches_the_service() {
    let (validator, mock) = validator(MockAddressVerifier::new());

    for address in [
        Address::new("", "New York", "NY", "10001", "US"),
        Address::new("123 Main St", " ", "NY", "10001", "US"),
        Address::new("123 Main St", "New York", "", "10001", "US"),
        Address::new("123 Main St", "New York", "NY", "", "US"),
    ] {
        let result = validator.validate(&address, AddressKind::Home).await;
        assert_eq!(result.tag(), "undeliverable");
    }

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn po_box_is_rejected_for_home_but_accepted_for_mailing() {
    let po_box = Address::new("PO Box 42", "Scottsdale", "AZ", "85251", "US");
    let (validator, _) = validator(
        MockAddressVerifier::new()
            .with_result(&po_box, "AV25")
            .with_result(&po_box, "AV25"),
    );

    let home = validator.validate(&po_box, AddressKind::Home).await;
    assert_eq!(home.tag(), "undeliverable");

    let mailing = validator.validate(&po_box, AddressKind::Mailing).await;
    assert!(mailing.is_deliverable());
}

#[tokio::test]
async fn input_is_cleaned_before_submission() {
    let (validator, mock) = validator(MockAddressVerifier::new());
    let messy = Address::new("  123   Main St ", "New York", "NY", "10001", "usa");

    validator.validate(&messy, AddressKind::Home).await;

    let submitted = &mock.calls()[0];
    assert_eq!(submitted.street, "123 Main St");
    assert_eq!(submitted.country, "US");
}

#[tokio::test]
async fn partial_match_on_home_po_box_is_undeliverable() {
    let po_box = Address::new("PO Box 42", "Scottsdale", "AZ", "85251", "US");
    let suggested = Address::new("PO Box 42", "Scottsdale", "AZ", "85251-0042", "US");
    let (validator, _) = validator(
        MockAddressVerifier::new()
            .with_result(&suggested, "AV22")
            .with_result(&suggested, "AV22"),
    );

    let home = validator.validate(&po_box, AddressKind::Home).await;
    assert_eq!(
        home,
        ValidationResult::Undeliverable {
            reason: "P.O. boxes cannot be used as a home address".into(),
        }
    );

    let mailing = validator.validate(&po_box, AddressKind::Mailing).await;
    assert_eq!(mailing.tag(), "correctionAvailable");
}

#[tokio::test]
async fn partial_match_on_military_address_is_undeliverable() {
    let input = Address::new("Unit 2050 Box 4190", "APO", "AP", "96278", "US");
    let (validator, _) = validator(MockAddressVerifier::new().with_result(&input, "AV21"));

    let result = validator.validate(&input, AddressKind::Recipient).await;
    assert_eq!(result.tag(), "undeliverable");
}

#[tokio::test]
async fn partial_match_identical_to_input_is_deliverable() {
    let input = main_street();
    let echoed = Address::new("123 MAIN  ST", "new york", "NY", "10001", "");
    let (validator, _) = validator(MockAddressVerifier::new().with_result(&echoed, "AV22"));

    match validator.validate(&input, AddressKind::Home).await {
        ValidationResult::Deliverable { is_different, .. } => assert!(!is_different),
        other => panic!("expected deliverable, got {:?}", other),
    }
}
