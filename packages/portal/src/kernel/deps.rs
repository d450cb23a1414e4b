//! Portal dependencies for workflows (using traits for testability)
//!
//! This module provides the dependency container used by the save workflow.
//! All external services use trait abstractions to enable testing.

use anyhow::Result;
use async_trait::async_trait;
use melissa_client::{AddressQuery, MelissaClient};
use std::sync::Arc;

use crate::common::Address;
use crate::config::Config;
use crate::kernel::{
    BaseAddressVerifier, BaseAuthTokenProvider, BaseMemberApi, MemberApiClient, VerifyResponse,
};

// =============================================================================
// MelissaClient Adapter (implements BaseAddressVerifier trait)
// =============================================================================

/// Wrapper around MelissaClient that implements BaseAddressVerifier trait
pub struct MelissaAdapter(pub Arc<MelissaClient>);

impl MelissaAdapter {
    pub fn new(client: Arc<MelissaClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseAddressVerifier for MelissaAdapter {
    async fn verify(&self, address: &Address) -> Result<VerifyResponse> {
        let address = address.cleaned();
        let query = AddressQuery {
            address_line1: address.street,
            locality: address.city,
            administrative_area: address.state,
            postal_code: address.postal_code,
            country: address.country,
        };

        self.0
            .verify_address(&query)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// Static Token Provider
// =============================================================================

/// Hands out a fixed bearer token (tooling and service accounts)
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl BaseAuthTokenProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> Result<Option<String>> {
        Ok(self.token.clone())
    }
}

// =============================================================================
// PortalDeps
// =============================================================================

/// Portal dependencies accessible to workflows (using traits for testability)
#[derive(Clone)]
pub struct PortalDeps {
    pub address_verifier: Arc<dyn BaseAddressVerifier>,
    pub member_api: Arc<dyn BaseMemberApi>,
    pub auth: Arc<dyn BaseAuthTokenProvider>,
}

impl PortalDeps {
    pub fn new(
        address_verifier: Arc<dyn BaseAddressVerifier>,
        member_api: Arc<dyn BaseMemberApi>,
        auth: Arc<dyn BaseAuthTokenProvider>,
    ) -> Self {
        Self {
            address_verifier,
            member_api,
            auth,
        }
    }

    /// Wire the live HTTP implementations from configuration
    pub fn from_config(config: &Config) -> Self {
        let mut melissa = MelissaClient::new(config.melissa_api_key.clone());
        if let Some(url) = &config.melissa_base_url {
            melissa = melissa.with_base_url(url.clone());
        }

        Self::new(
            Arc::new(MelissaAdapter::new(Arc::new(melissa))),
            Arc::new(MemberApiClient::new(config.member_api_base_url.clone())),
            Arc::new(StaticTokenProvider::new(config.member_api_token.clone())),
        )
    }
}
