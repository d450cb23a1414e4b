use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::{BaseMemberApi, MemberApiResponse};
use crate::common::SectionData;
use crate::domains::sections::Section;

/// HTTP client for the member data API
pub struct MemberApiClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct UpdateSettingRequest<'a> {
    key: &'a str,
    value: Value,
}

impl MemberApiClient {
    /// Create a new member API client rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        token: &str,
        body: &B,
    ) -> Result<MemberApiResponse> {
        let response = self
            .client
            .post(self.url(endpoint))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request", endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // The API reports rejected saves as JSON even on error statuses
            if let Ok(parsed) = serde_json::from_str::<MemberApiResponse>(&body) {
                if parsed.error.is_some() {
                    return Ok(MemberApiResponse {
                        success: false,
                        ..parsed
                    });
                }
            }
            anyhow::bail!("Member API error {} on {}: {}", status, endpoint, body);
        }

        response
            .json::<MemberApiResponse>()
            .await
            .with_context(|| format!("Failed to parse {} response", endpoint))
    }
}

#[async_trait]
impl BaseMemberApi for MemberApiClient {
    async fn get_settings(&self, token: &str) -> Result<MemberApiResponse> {
        let response = self
            .client
            .get(self.url("getSettings"))
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send getSettings request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Member API error {} on getSettings: {}", status, body);
        }

        response
            .json::<MemberApiResponse>()
            .await
            .context("Failed to parse getSettings response")
    }

    async fn update_setting(&self, token: &str, key: &str, value: Value) -> Result<MemberApiResponse> {
        self.post("updateSetting", token, &UpdateSettingRequest { key, value })
            .await
    }

    async fn update_settings(&self, token: &str, settings: &SectionData) -> Result<MemberApiResponse> {
        self.post("updateSettings", token, settings).await
    }

    async fn update_section(
        &self,
        token: &str,
        section: Section,
        data: &SectionData,
    ) -> Result<MemberApiResponse> {
        tracing::debug!(section = %section, endpoint = section.endpoint(), "Persisting section");
        self.post(section.endpoint(), token, data).await
    }
}
