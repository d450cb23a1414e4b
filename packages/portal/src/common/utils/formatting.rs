/// Pure helpers for cleaning and displaying member-entered text
///
/// No I/O here: inputs in, strings out.

/// Country used when none was entered.
pub const DEFAULT_COUNTRY: &str = "US";

/// Trim and collapse runs of internal whitespace to a single space.
pub fn clean_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a country to an ISO-3166 alpha-2 code.
///
/// Blank input falls back to `US`. Common spellings of the United States are
/// folded to `US`; anything else is upper-cased as entered.
pub fn normalize_country(value: &str) -> String {
    let cleaned = clean_text(value);
    if cleaned.is_empty() {
        return DEFAULT_COUNTRY.to_string();
    }

    match cleaned.to_ascii_uppercase().replace('.', "").as_str() {
        "USA" | "US" | "UNITED STATES" | "UNITED STATES OF AMERICA" => DEFAULT_COUNTRY.to_string(),
        other => other.to_string(),
    }
}

/// Turn a camelCase field name into a sentence-case label.
///
/// `homePostalCode` becomes `Home postal code`.
pub fn humanize_field(field: &str) -> String {
    let mut label = String::with_capacity(field.len() + 4);
    for (i, ch) in field.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.extend(ch.to_lowercase());
        } else if ch == '_' {
            label.push(' ');
        } else {
            label.push(ch);
        }
    }
    label
}

/// Case- and whitespace-insensitive equality for address components.
pub fn same_text(a: &str, b: &str) -> bool {
    clean_text(a).to_lowercase() == clean_text(b).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  123   Main \t St "), "123 Main St");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn test_normalize_country() {
        assert_eq!(normalize_country(""), "US");
        assert_eq!(normalize_country("usa"), "US");
        assert_eq!(normalize_country("U.S.A."), "US");
        assert_eq!(normalize_country("United States"), "US");
        assert_eq!(normalize_country(" ca "), "CA");
    }

    #[test]
    fn test_humanize_field() {
        assert_eq!(humanize_field("homePostalCode"), "Home postal code");
        assert_eq!(humanize_field("firstName"), "First name");
        assert_eq!(humanize_field("email"), "Email");
    }

    #[test]
    fn test_same_text_ignores_case_and_spacing() {
        assert!(same_text("123 Main St", "123  MAIN st"));
        assert!(!same_text("123 Main St", "123 Main Street"));
    }
}
