use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::models::{dedupe::DedupeKeyStrategy, error::ConfigError};

pub const DEFAULT_REGION: &str = "us-east-1";

/// Environment configuration, read once at cold start.
///
/// Required values are optional here so the function can start and report a
/// misconfiguration per invocation instead of crashing during init.
#[derive(Clone, Deserialize, Debug, Default)]
pub struct Config {
    pub from_email: Option<String>,
    pub verification_base_url: Option<String>,
    pub dedupe_table_name: Option<String>,

    pub aws_region: Option<String>,
    pub aws_endpoint_url: Option<String>,

    #[serde(default)]
    pub dedupe_key_strategy: DedupeKeyStrategy,
}

/// The validated subset every invocation needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelaySettings {
    pub from_email: String,
    pub verification_base_url: String,
    pub dedupe_table_name: String,
    pub dedupe_key_strategy: DedupeKeyStrategy,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|e| anyhow!("Invalid environment configuration: {}", e))?;
        Ok(config)
    }

    pub fn region(&self) -> String {
        non_empty(&self.aws_region).unwrap_or(DEFAULT_REGION).to_string()
    }

    pub fn relay_settings(&self) -> Result<RelaySettings, ConfigError> {
        let from_email = non_empty(&self.from_email).ok_or(ConfigError::Missing("FROM_EMAIL"))?;
        let verification_base_url = non_empty(&self.verification_base_url)
            .ok_or(ConfigError::Missing("VERIFICATION_BASE_URL"))?;
        let dedupe_table_name =
            non_empty(&self.dedupe_table_name).ok_or(ConfigError::Missing("DEDUPE_TABLE_NAME"))?;

        Ok(RelaySettings {
            from_email: from_email.to_string(),
            verification_base_url: verification_base_url.to_string(),
            dedupe_table_name: dedupe_table_name.to_string(),
            dedupe_key_strategy: self.dedupe_key_strategy,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
