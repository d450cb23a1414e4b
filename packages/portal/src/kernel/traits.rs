// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Deciding what a verification result means, or when to roll back a section,
// lives in the domains that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAddressVerifier, BaseMemberApi)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{Address, SectionData};
use crate::domains::sections::Section;

pub use melissa_client::VerifyResponse;

// =============================================================================
// Address Verification Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseAddressVerifier: Send + Sync {
    /// Submit one address and return the raw verification envelope
    async fn verify(&self, address: &Address) -> Result<VerifyResponse>;
}

// =============================================================================
// Member Data API Trait (Infrastructure)
// =============================================================================

/// Response body shared by every member data endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Payload returned by read endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl MemberApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn partial(errors: Vec<String>) -> Self {
        Self {
            success: true,
            partial_success: Some(true),
            errors: Some(errors),
            ..Default::default()
        }
    }

    pub fn is_partial(&self) -> bool {
        self.partial_success.unwrap_or(false)
    }
}

#[async_trait]
pub trait BaseMemberApi: Send + Sync {
    /// Fetch the member's portal settings
    async fn get_settings(&self, token: &str) -> Result<MemberApiResponse>;

    /// Update a single setting
    async fn update_setting(&self, token: &str, key: &str, value: Value) -> Result<MemberApiResponse>;

    /// Update several settings at once
    async fn update_settings(&self, token: &str, settings: &SectionData) -> Result<MemberApiResponse>;

    /// Persist one section of member data to its section-scoped endpoint
    async fn update_section(
        &self,
        token: &str,
        section: Section,
        data: &SectionData,
    ) -> Result<MemberApiResponse>;
}

// =============================================================================
// Auth Token Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseAuthTokenProvider: Send + Sync {
    /// Short-lived bearer token for the signed-in member, `None` if there is no session
    async fn bearer_token(&self) -> Result<Option<String>>;
}
