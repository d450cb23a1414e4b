use serde::{Deserialize, Serialize};

/// Query parameters for a `doGlobalAddress` lookup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddressQuery {
    /// Address line 1 (street)
    #[serde(rename = "a1")]
    pub address_line1: String,
    #[serde(rename = "loc")]
    pub locality: String,
    #[serde(rename = "admarea")]
    pub administrative_area: String,
    #[serde(rename = "postal")]
    pub postal_code: String,
    /// ISO-3166 alpha-2 country code
    #[serde(rename = "ctry")]
    pub country: String,
}

/// Response envelope returned by the verification endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyResponse {
    #[serde(rename = "TransmissionResults", default)]
    pub transmission_results: String,
    #[serde(rename = "Version", default)]
    pub version: String,
    #[serde(rename = "Records", default)]
    pub records: Vec<Record>,
}

/// A single verified address record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Record {
    /// Concatenated result codes, e.g. `AV25GS05` or `AV25,GS05`
    #[serde(rename = "Results", default)]
    pub results: String,
    #[serde(rename = "AddressLine1", default)]
    pub address_line1: String,
    #[serde(rename = "Locality", default)]
    pub locality: String,
    #[serde(rename = "AdministrativeArea", default)]
    pub administrative_area: String,
    #[serde(rename = "PostalCode", default)]
    pub postal_code: String,
    #[serde(rename = "CountryISO3166_1_Alpha2", default)]
    pub country: String,
}

/// A transmission-level failure reported inside a 2xx envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmissionError {
    pub code: String,
    pub message: String,
}

impl std::fmt::Display for TransmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// Human-readable text for a `GEnn` transmission code.
pub fn transmission_message(code: &str) -> Option<&'static str> {
    let message = match code {
        "GE01" => "Empty request structure",
        "GE02" => "Empty request record structure",
        "GE03" => "Too many records in request",
        "GE04" => "API key is missing",
        "GE05" => "Invalid API key",
        "GE06" => "API key has been disabled",
        "GE07" => "Invalid request",
        "GE08" => "Invalid API key for this product",
        "GE09" => "Invalid or unsupported country",
        "GE10" => "Address verification credits have been exhausted",
        "GE11" => "Service is temporarily unavailable",
        _ => return None,
    };
    Some(message)
}

impl VerifyResponse {
    /// First transmission error in the envelope, if any.
    ///
    /// `GE00` and an empty string both mean the request was accepted.
    pub fn transmission_error(&self) -> Option<TransmissionError> {
        self.transmission_results
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(str::trim)
            .find(|code| !code.is_empty() && *code != "GE00")
            .map(|code| TransmissionError {
                code: code.to_string(),
                message: transmission_message(code)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Address service error {}", code)),
            })
    }

    pub fn first_record(&self) -> Option<&Record> {
        self.records.first()
    }
}

impl Record {
    /// Split `Results` into individual four-character codes.
    pub fn result_codes(&self) -> Vec<String> {
        let compact: Vec<char> = self
            .results
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        compact
            .chunks(4)
            .filter(|chunk| chunk.len() == 4)
            .map(|chunk| chunk.iter().collect::<String>().to_ascii_uppercase())
            .collect()
    }
}
