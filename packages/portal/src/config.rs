use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub melissa_api_key: String,
    pub melissa_base_url: Option<String>,
    pub member_api_base_url: String,
    /// Static bearer token for tooling; interactive sessions supply their own
    pub member_api_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            melissa_api_key: env::var("MELISSA_API_KEY")
                .context("MELISSA_API_KEY must be set")?,
            melissa_base_url: env::var("MELISSA_BASE_URL").ok(),
            member_api_base_url: env::var("MEMBER_API_BASE_URL")
                .context("MEMBER_API_BASE_URL must be set")?,
            member_api_token: env::var("MEMBER_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
        })
    }
}
