use serde_json::Value;
use tracing::{error, info, warn};

use crate::common::SectionData;
use crate::domains::sections::coordinator::{default_failure_message, SESSION_EXPIRED};
use crate::domains::sections::{SaveError, Section};
use crate::kernel::{MemberApiResponse, PortalDeps};

/// Change one setting.
pub async fn update_setting(
    deps: &PortalDeps,
    key: &str,
    value: Value,
) -> Result<MemberApiResponse, SaveError> {
    let token = session_token(deps).await?;
    info!(key = %key, "Updating setting");
    let result = deps.member_api.update_setting(&token, key, value).await;
    settled(result)
}

/// Change several settings in one request.
pub async fn update_settings(
    deps: &PortalDeps,
    settings: &SectionData,
) -> Result<MemberApiResponse, SaveError> {
    let token = session_token(deps).await?;
    info!(count = settings.len(), "Updating settings");
    let result = deps.member_api.update_settings(&token, settings).await;
    settled(result)
}

async fn session_token(deps: &PortalDeps) -> Result<String, SaveError> {
    match deps.auth.bearer_token().await {
        Ok(Some(token)) => Ok(token),
        Ok(None) => {
            warn!("No active session, settings not sent");
            Err(session_expired())
        }
        Err(e) => {
            warn!(error = %e, "Failed to obtain auth token, settings not sent");
            Err(session_expired())
        }
    }
}

fn session_expired() -> SaveError {
    SaveError::PersistenceFailed {
        message: SESSION_EXPIRED.to_string(),
    }
}

fn settled(result: anyhow::Result<MemberApiResponse>) -> Result<MemberApiResponse, SaveError> {
    match result {
        Ok(response) if response.success => Ok(response),
        Ok(response) => {
            error!(
                error = response.error.as_deref().unwrap_or("unknown"),
                "Member API rejected settings"
            );
            Err(SaveError::PersistenceFailed {
                message: response
                    .error
                    .unwrap_or_else(|| default_failure_message(Section::Settings)),
            })
        }
        Err(e) => {
            error!(error = %e, "Failed to save settings");
            Err(SaveError::PersistenceFailed {
                message: default_failure_message(Section::Settings),
            })
        }
    }
}
