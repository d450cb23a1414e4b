use serde_json::{Map, Value};

use super::address::{AddressKind, COUNTRY};
use super::utils::{clean_text, normalize_country};

/// Flat field map for one section of member data.
///
/// Sent as-is as the JSON body of the section's update endpoint.
pub type SectionData = Map<String, Value>;

/// Read a field as text. Numbers are rendered, everything else is empty.
pub fn text_field(data: &SectionData, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Whether a value satisfies a required-field check.
///
/// Strings must be non-empty after trimming and arrays must be non-empty.
/// Null never counts; booleans, numbers and objects always do.
pub fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Produce the payload that gets persisted.
///
/// Strings are trimmed, each address slot gets a normalized country, and an
/// aliased mailing address is dropped so it is never stored independently.
pub fn clean_section_data(data: &SectionData, address_kinds: &[AddressKind]) -> SectionData {
    let mut cleaned: SectionData = data
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => Value::String(clean_text(s)),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect();

    for kind in address_kinds {
        if kind.is_aliased(data) {
            for field in kind.fields() {
                cleaned.remove(&field);
            }
            continue;
        }

        let country_field = kind.field(COUNTRY);
        let has_any = kind
            .fields()
            .iter()
            .any(|field| is_filled(data.get(field)));
        if has_any {
            let country = text_field(&cleaned, &country_field);
            cleaned.insert(country_field, Value::String(normalize_country(&country)));
        }
    }

    cleaned
}
