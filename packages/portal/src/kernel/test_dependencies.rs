// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into PortalDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use melissa_client::Record;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{
    BaseAddressVerifier, BaseAuthTokenProvider, BaseMemberApi, MemberApiResponse, PortalDeps,
    VerifyResponse,
};
use crate::common::{Address, SectionData};
use crate::domains::sections::Section;

/// Build a verification envelope with one record carrying `address` and `results`.
pub fn verification_response(address: &Address, results: &str) -> VerifyResponse {
    VerifyResponse {
        transmission_results: String::new(),
        version: "test".to_string(),
        records: vec![Record {
            results: results.to_string(),
            address_line1: address.street.clone(),
            locality: address.city.clone(),
            administrative_area: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
        }],
    }
}

/// Build an envelope that only carries a transmission code.
pub fn transmission_failure(code: &str) -> VerifyResponse {
    VerifyResponse {
        transmission_results: code.to_string(),
        version: "test".to_string(),
        records: Vec::new(),
    }
}

// =============================================================================
// Mock Address Verifier
// =============================================================================

enum VerifierReply {
    Response(VerifyResponse),
    Error(String),
}

/// Replays queued responses; once the queue is empty every address verifies as-is with `AV25`.
pub struct MockAddressVerifier {
    replies: Arc<Mutex<VecDeque<VerifierReply>>>,
    calls: Arc<Mutex<Vec<Address>>>,
}

impl MockAddressVerifier {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a raw envelope
    pub fn with_response(self, response: VerifyResponse) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(VerifierReply::Response(response));
        self
    }

    /// Queue a record for `address` with the given result codes
    pub fn with_result(self, address: &Address, results: &str) -> Self {
        self.with_response(verification_response(address, results))
    }

    /// Queue a transport failure
    pub fn with_error(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(VerifierReply::Error(message.to_string()));
        self
    }

    /// Get all addresses that were submitted
    pub fn calls(&self) -> Vec<Address> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAddressVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAddressVerifier for MockAddressVerifier {
    async fn verify(&self, address: &Address) -> Result<VerifyResponse> {
        self.calls.lock().unwrap().push(address.clone());

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(VerifierReply::Response(response)) => Ok(response),
            Some(VerifierReply::Error(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(verification_response(address, "AV25")),
        }
    }
}

// =============================================================================
// Mock Member API
// =============================================================================

/// Arguments captured from an update call
#[derive(Debug, Clone)]
pub struct UpdateCall {
    pub token: String,
    pub section: Option<Section>,
    pub endpoint: String,
    pub body: Value,
}

enum ApiReply {
    Response(MemberApiResponse),
    Error(String),
}

/// Replays queued responses; defaults to `{success: true}`.
pub struct MockMemberApi {
    replies: Arc<Mutex<VecDeque<ApiReply>>>,
    calls: Arc<Mutex<Vec<UpdateCall>>>,
    yield_before_reply: bool,
}

impl MockMemberApi {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            yield_before_reply: false,
        }
    }

    pub fn with_response(self, response: MemberApiResponse) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ApiReply::Response(response));
        self
    }

    /// Queue a transport failure
    pub fn with_error(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ApiReply::Error(message.to_string()));
        self
    }

    /// Suspend once before answering so concurrent callers interleave
    pub fn yielding(mut self) -> Self {
        self.yield_before_reply = true;
        self
    }

    /// Get all update calls that were made
    pub fn calls(&self) -> Vec<UpdateCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn reply(&self, call: UpdateCall) -> Result<MemberApiResponse> {
        self.calls.lock().unwrap().push(call);

        if self.yield_before_reply {
            tokio::task::yield_now().await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(ApiReply::Response(response)) => Ok(response),
            Some(ApiReply::Error(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(MemberApiResponse::ok()),
        }
    }
}

impl Default for MockMemberApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMemberApi for MockMemberApi {
    async fn get_settings(&self, token: &str) -> Result<MemberApiResponse> {
        self.reply(UpdateCall {
            token: token.to_string(),
            section: None,
            endpoint: "getSettings".to_string(),
            body: Value::Null,
        })
        .await
    }

    async fn update_setting(&self, token: &str, key: &str, value: Value) -> Result<MemberApiResponse> {
        self.reply(UpdateCall {
            token: token.to_string(),
            section: None,
            endpoint: "updateSetting".to_string(),
            body: serde_json::json!({ "key": key, "value": value }),
        })
        .await
    }

    async fn update_settings(&self, token: &str, settings: &SectionData) -> Result<MemberApiResponse> {
        self.reply(UpdateCall {
            token: token.to_string(),
            section: None,
            endpoint: "updateSettings".to_string(),
            body: Value::Object(settings.clone()),
        })
        .await
    }

    async fn update_section(
        &self,
        token: &str,
        section: Section,
        data: &SectionData,
    ) -> Result<MemberApiResponse> {
        self.reply(UpdateCall {
            token: token.to_string(),
            section: Some(section),
            endpoint: section.endpoint().to_string(),
            body: Value::Object(data.clone()),
        })
        .await
    }
}

// =============================================================================
// Mock Auth Token Provider
// =============================================================================

pub struct MockTokenProvider {
    token: Option<String>,
}

impl MockTokenProvider {
    pub fn signed_in(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }

    pub fn signed_out() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl BaseAuthTokenProvider for MockTokenProvider {
    async fn bearer_token(&self) -> Result<Option<String>> {
        Ok(self.token.clone())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub address_verifier: Arc<MockAddressVerifier>,
    pub member_api: Arc<MockMemberApi>,
    pub auth: Arc<MockTokenProvider>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            address_verifier: Arc::new(MockAddressVerifier::new()),
            member_api: Arc::new(MockMemberApi::new()),
            auth: Arc::new(MockTokenProvider::signed_in("test-token")),
        }
    }

    /// Set a mock address verifier
    pub fn mock_verifier(mut self, verifier: MockAddressVerifier) -> Self {
        self.address_verifier = Arc::new(verifier);
        self
    }

    /// Set a mock member API
    pub fn mock_member_api(mut self, api: MockMemberApi) -> Self {
        self.member_api = Arc::new(api);
        self
    }

    /// Set a mock token provider
    pub fn mock_auth(mut self, auth: MockTokenProvider) -> Self {
        self.auth = Arc::new(auth);
        self
    }

    /// Convert into PortalDeps for testing
    pub fn into_deps(&self) -> PortalDeps {
        PortalDeps::new(
            self.address_verifier.clone(),
            self.member_api.clone(),
            self.auth.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
