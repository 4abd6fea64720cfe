use std::time::Duration;

use anyhow::Context;

pub const GATEWAY_URL_VAR: &str = "AGENT_GATEWAY_URL";
pub const GATEWAY_API_KEY_VAR: &str = "AGENT_GATEWAY_API_KEY";
pub const GATEWAY_TIMEOUT_VAR: &str = "AGENT_GATEWAY_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Flags win over the environment.
    pub fn resolve(url_flag: Option<String>, timeout_flag: Option<u64>) -> anyhow::Result<Self> {
        Self::from_lookup(url_flag, timeout_flag, |name| std::env::var(name).ok())
    }

    fn from_lookup(
        url_flag: Option<String>,
        timeout_flag: Option<u64>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let base_url = url_flag
            .or_else(|| lookup(GATEWAY_URL_VAR))
            .filter(|url| !url.trim().is_empty())
            .with_context(|| format!("{GATEWAY_URL_VAR} must be set to the agent gateway base URL"))?;

        let timeout_secs = match timeout_flag {
            Some(secs) => secs,
            None => match lookup(GATEWAY_TIMEOUT_VAR) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{GATEWAY_TIMEOUT_VAR} must be a whole number of seconds"))?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };

        Ok(Self {
            base_url,
            api_key: lookup(GATEWAY_API_KEY_VAR).filter(|key| !key.is_empty()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
