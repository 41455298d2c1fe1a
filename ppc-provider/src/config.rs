//! Provider configuration
//!
//! The host hands over the provider block as a map of attribute values.
//! Anything left out falls back to the environment.

use std::collections::HashMap;
use std::time::Duration;

use ppc_core::provider::{ProviderError, ProviderResult};
use ppc_core::resource::Value;

pub const ENV_REGION: &str = "PPC_REGION";
pub const ENV_ENDPOINT: &str = "PPC_ENDPOINT";
pub const ENV_API_TOKEN: &str = "PPC_API_TOKEN";
pub const ENV_TIMEOUT: &str = "PPC_TIMEOUT";

const DEFAULT_TIMEOUT_SECS: i64 = 60;

/// Configuration for the provider
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Provider block attributes (region, endpoint, api_token, timeout_secs)
    pub attributes: HashMap<String, Value>,
}

/// Settings needed to open an API session
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSettings {
    pub endpoint: String,
    pub api_token: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(attributes: HashMap<String, Value>) -> Self {
        Self { attributes }
    }

    /// Get a string attribute value
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.attributes.get(key) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get an integer attribute value
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.attributes.get(key) {
            Some(Value::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Resolve connection settings, falling back to the process environment
    pub fn resolve(&self) -> ProviderResult<ConnectionSettings> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve connection settings with an explicit environment lookup
    pub fn resolve_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> ProviderResult<ConnectionSettings> {
        let setting = |key: &str, env_key: &str| {
            self.get_string(key)
                .map(str::to_string)
                .or_else(|| env(env_key))
                .filter(|s| !s.is_empty())
        };

        let endpoint = match setting("endpoint", ENV_ENDPOINT) {
            Some(endpoint) => endpoint,
            None => {
                let region = setting("region", ENV_REGION).ok_or_else(|| {
                    ProviderError::session(format!(
                        "Either endpoint or region must be set (or {} / {})",
                        ENV_ENDPOINT, ENV_REGION
                    ))
                })?;
                format!("https://{}.power-iaas.cloud.ibm.com", region)
            }
        };

        let api_token = setting("api_token", ENV_API_TOKEN).ok_or_else(|| {
            ProviderError::session(format!("api_token is not set (or {})", ENV_API_TOKEN))
        })?;

        let timeout_secs = match self.get_int("timeout_secs") {
            Some(secs) => secs,
            None => match env(ENV_TIMEOUT) {
                Some(raw) => raw.parse::<i64>().map_err(|_| {
                    ProviderError::invalid_config(format!(
                        "{} must be a number of seconds, got '{}'",
                        ENV_TIMEOUT, raw
                    ))
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs <= 0 {
            return Err(ProviderError::invalid_config(format!(
                "timeout_secs must be positive, got {}",
                timeout_secs
            )));
        }

        Ok(ConnectionSettings {
            endpoint,
            api_token,
            timeout: Duration::from_secs(timeout_secs as u64),
        })
    }
}
