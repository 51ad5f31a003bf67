use std::time::Duration;

use thiserror::Error;

pub const WORKSPACE_URL_VAR: &str = "WORKSPACE_URL";
pub const WORKSPACE_TIMEOUT_VAR: &str = "WORKSPACE_TIMEOUT_SECS";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Startup configuration, resolved once and handed to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub workspace_url: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),

    #[error("{name} must be a positive integer (got '{value}')")]
    Invalid { name: &'static str, value: String },
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let workspace_url = lookup(WORKSPACE_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(WORKSPACE_URL_VAR))?;

        let timeout_secs = match lookup(WORKSPACE_TIMEOUT_VAR) {
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: WORKSPACE_TIMEOUT_VAR,
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            workspace_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
