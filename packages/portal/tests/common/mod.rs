// Common test utilities

#![allow(dead_code)]

use portal_core::common::{Address, SectionData};
use serde_json::json;

pub fn main_street() -> Address {
    Address::new("123 Main St", "New York", "NY", "10001", "US")
}

pub fn section_data(value: serde_json::Value) -> SectionData {
    value
        .as_object()
        .cloned()
        .expect("fixture must be a JSON object")
}

/// Addresses section as loaded from the server.
pub fn saved_addresses() -> SectionData {
    section_data(json!({
        "homeStreet": "1 Old Rd",
        "homeCity": "Boston",
        "homeState": "MA",
        "homePostalCode": "02108",
        "homeCountry": "US",
        "sameAsHome": true,
    }))
}

/// Overwrite the home fields with `address`.
pub fn with_home(mut data: SectionData, address: &Address) -> SectionData {
    data.insert("homeStreet".into(), json!(address.street));
    data.insert("homeCity".into(), json!(address.city));
    data.insert("homeState".into(), json!(address.state));
    data.insert("homePostalCode".into(), json!(address.postal_code));
    data.insert("homeCountry".into(), json!(address.country));
    data
}

pub const HOME_REQUIRED: &[&str] = &["homeStreet", "homeCity", "homeState", "homePostalCode"];
