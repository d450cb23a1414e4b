//! Pure Melissa Global Address Verification REST client.
//!
//! A minimal client for the `doGlobalAddress` endpoint. It submits one address
//! per request and returns the raw response envelope; interpreting result codes
//! is left to callers.
//!
//! # Example
//!
//! ```rust,ignore
//! use melissa_client::{AddressQuery, MelissaClient};
//!
//! let client = MelissaClient::new(std::env::var("MELISSA_API_KEY")?);
//!
//! let response = client
//!     .verify_address(&AddressQuery {
//!         address_line1: "123 Main St".into(),
//!         locality: "New York".into(),
//!         administrative_area: "NY".into(),
//!         postal_code: "10001".into(),
//!         country: "US".into(),
//!     })
//!     .await?;
//!
//! if let Some(err) = response.transmission_error() {
//!     eprintln!("{}", err);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{MelissaError, Result};
pub use types::{AddressQuery, Record, TransmissionError, VerifyResponse};

const BASE_URL: &str = "https://address.melissadata.net/v3/WEB/GlobalAddress/doGlobalAddress";

#[derive(Clone)]
pub struct MelissaClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl MelissaClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (staging, proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Submit one address for verification.
    ///
    /// Only transport and HTTP status failures are errors here. A 2xx response
    /// may still carry a transmission error; check
    /// [`VerifyResponse::transmission_error`].
    pub async fn verify_address(&self, query: &AddressQuery) -> Result<VerifyResponse> {
        tracing::debug!(
            locality = %query.locality,
            country = %query.country,
            "Submitting address for verification"
        );

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("id", self.api_key.as_str()), ("format", "json")])
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MelissaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let parsed: VerifyResponse =
            serde_json::from_str(&body).map_err(|e| MelissaError::Parse(e.to_string()))?;

        tracing::debug!(
            transmission = %parsed.transmission_results,
            records = parsed.records.len(),
            "Address verification response received"
        );

        Ok(parsed)
    }
}
