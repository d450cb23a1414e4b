//! Settings changes sent straight to the member API.

mod common;

use common::section_data;
use portal_core::domains::sections::coordinator::SESSION_EXPIRED;
use portal_core::domains::sections::SaveError;
use portal_core::domains::settings::{update_setting, update_settings};
use portal_core::kernel::test_dependencies::{MockMemberApi, MockTokenProvider};
use portal_core::kernel::{MemberApiResponse, TestDependencies};
use serde_json::json;

#[tokio::test]
async fn single_setting_is_sent_with_the_session_token() {
    let deps = TestDependencies::new();

    let response = update_setting(&deps.into_deps(), "receiveNewsletter", json!(false))
        .await
        .unwrap();

    assert!(response.success);
    let calls = deps.member_api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, "updateSetting");
    assert_eq!(calls[0].token, "test-token");
    assert_eq!(calls[0].body, json!({ "key": "receiveNewsletter", "value": false }));
}

#[tokio::test]
async fn several_settings_go_out_in_one_request() {
    let deps = TestDependencies::new().mock_member_api(
        MockMemberApi::new().with_response(MemberApiResponse::partial(vec!["theme is read-only".into()])),
    );
    let settings = section_data(json!({ "receiveNewsletter": true, "theme": "dark" }));

    let response = update_settings(&deps.into_deps(), &settings).await.unwrap();

    assert!(response.is_partial());
    let calls = deps.member_api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint, "updateSettings");
    assert_eq!(calls[0].body["theme"], "dark");
}

#[tokio::test]
async fn signed_out_member_cannot_change_settings() {
    let deps = TestDependencies::new().mock_auth(MockTokenProvider::signed_out());

    let err = update_setting(&deps.into_deps(), "receiveNewsletter", json!(true))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SaveError::PersistenceFailed {
            message: SESSION_EXPIRED.into(),
        }
    );
    assert_eq!(deps.member_api.call_count(), 0);
}

#[tokio::test]
async fn rejected_and_failed_updates_surface_a_message() {
    let deps = TestDependencies::new().mock_member_api(
        MockMemberApi::new()
            .with_response(MemberApiResponse::failed("Setting is locked"))
            .with_error("connection reset"),
    );
    let deps = deps.into_deps();

    let rejected = update_setting(&deps, "theme", json!("dark")).await.unwrap_err();
    assert_eq!(rejected.to_string(), "Setting is locked");

    let failed = update_setting(&deps, "theme", json!("dark")).await.unwrap_err();
    assert_eq!(failed.to_string(), "Failed to save settings. Please try again.");
}
