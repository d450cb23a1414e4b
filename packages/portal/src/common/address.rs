use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::section_data::{text_field, SectionData};
use super::utils::{clean_text, normalize_country, same_text};

/// Field suffixes appended to an [`AddressKind`] prefix inside section data.
pub const STREET: &str = "Street";
pub const CITY: &str = "City";
pub const STATE: &str = "State";
pub const POSTAL_CODE: &str = "PostalCode";
pub const COUNTRY: &str = "Country";

/// Flag on the addresses section that makes mailing mirror home.
pub const SAME_AS_HOME: &str = "sameAsHome";

/// Which of a member's postal addresses a set of fields describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Home,
    Mailing,
    /// Remains recipient on the cryopreservation arrangements section
    Recipient,
}

impl AddressKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            AddressKind::Home => "home",
            AddressKind::Mailing => "mailing",
            AddressKind::Recipient => "recipient",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AddressKind::Home => "home",
            AddressKind::Mailing => "mailing",
            AddressKind::Recipient => "recipient",
        }
    }

    /// Full field name for one component, e.g. `homePostalCode`.
    pub fn field(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix(), suffix)
    }

    /// All five field names owned by this address.
    pub fn fields(&self) -> [String; 5] {
        [
            self.field(STREET),
            self.field(CITY),
            self.field(STATE),
            self.field(POSTAL_CODE),
            self.field(COUNTRY),
        ]
    }

    /// True when this address mirrors another one and must not be handled on its own.
    pub fn is_aliased(&self, data: &SectionData) -> bool {
        match self {
            AddressKind::Mailing => match data.get(SAME_AS_HOME) {
                Some(Value::Bool(flag)) => *flag,
                Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
                _ => false,
            },
            _ => false,
        }
    }

    /// Whether a P.O. box is an acceptable value for this address.
    pub fn allows_po_box(&self) -> bool {
        matches!(self, AddressKind::Mailing)
    }
}

impl std::fmt::Display for AddressKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A postal address as entered by a member or returned by verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// ISO-3166 alpha-2
    pub country: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
            country: country.into(),
        }
    }

    /// Read the address stored under `kind`'s prefix.
    pub fn from_section(data: &SectionData, kind: AddressKind) -> Self {
        Self {
            street: text_field(data, &kind.field(STREET)),
            city: text_field(data, &kind.field(CITY)),
            state: text_field(data, &kind.field(STATE)),
            postal_code: text_field(data, &kind.field(POSTAL_CODE)),
            country: text_field(data, &kind.field(COUNTRY)),
        }
    }

    /// Overwrite the fields stored under `kind`'s prefix.
    pub fn write_to_section(&self, data: &mut SectionData, kind: AddressKind) {
        let values = [
            (STREET, &self.street),
            (CITY, &self.city),
            (STATE, &self.state),
            (POSTAL_CODE, &self.postal_code),
            (COUNTRY, &self.country),
        ];
        for (suffix, value) in values {
            data.insert(kind.field(suffix), Value::String(value.clone()));
        }
    }

    /// Trimmed copy with the country normalized.
    pub fn cleaned(&self) -> Self {
        Self {
            street: clean_text(&self.street),
            city: clean_text(&self.city),
            state: clean_text(&self.state),
            postal_code: clean_text(&self.postal_code),
            country: normalize_country(&self.country),
        }
    }

    /// Nothing entered. Country is ignored since it has a default.
    pub fn is_empty(&self) -> bool {
        [&self.street, &self.city, &self.state, &self.postal_code]
            .iter()
            .all(|v| v.trim().is_empty())
    }

    /// Suffixes of the required components that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            (STREET, &self.street),
            (CITY, &self.city),
            (STATE, &self.state),
            (POSTAL_CODE, &self.postal_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(suffix, _)| suffix)
        .collect()
    }

    /// True if any component differs, ignoring case and surrounding whitespace.
    pub fn differs_from(&self, other: &Address) -> bool {
        !(same_text(&self.street, &other.street)
            && same_text(&self.city, &other.city)
            && same_text(&self.state, &other.state)
            && same_text(&self.postal_code, &other.postal_code)
            && same_text(&normalize_country(&self.country), &normalize_country(&other.country)))
    }

    /// `123 Main St, New York, NY 10001, US`
    pub fn one_line(&self) -> String {
        let cleaned = self.cleaned();
        let region = [cleaned.state.as_str(), cleaned.postal_code.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        [cleaned.street, cleaned.city, region, cleaned.country]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
