//! Contract with the agent gateway and an HTTP adapter for it.

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub response: AgentResponse,
}

impl GatewayReply {
    pub fn is_success(&self) -> bool {
        self.success && self.response.status == STATUS_SUCCESS
    }

    /// Agent-supplied explanation for a failed reply, `error` before `message`.
    pub fn failure_message(&self) -> Option<&str> {
        [self.error.as_deref(), self.response.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|message| !message.trim().is_empty())
    }
}

/// Sends one natural-language instruction to one agent.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    async fn invoke(&self, instruction: &str, agent_id: &str) -> anyhow::Result<GatewayReply>;
}

#[derive(Debug, Serialize)]
struct AgentRequest<'a> {
    message: &'a str,
    agent_id: &'a str,
}

pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpGateway {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/agent", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AgentGateway for HttpGateway {
    async fn invoke(&self, instruction: &str, agent_id: &str) -> anyhow::Result<GatewayReply> {
        let mut request = self.client.post(&self.endpoint).json(&AgentRequest {
            message: instruction,
            agent_id,
        });
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let resp = request
            .send()
            .await
            .with_context(|| format!("agent gateway request to {} failed", self.endpoint))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("agent gateway error {status}: {text}");
        }

        resp.json::<GatewayReply>()
            .await
            .context("failed to parse agent gateway reply")
    }
}

/// Answers every call with a reply saved earlier, for offline rendering.
pub struct ReplayGateway {
    reply: GatewayReply,
}

impl ReplayGateway {
    /// Accepts either a full gateway reply or a bare agent result; the latter
    /// is treated as a successful reply carrying it.
    pub fn from_saved(saved: Value) -> anyhow::Result<Self> {
        let is_reply = saved
            .as_object()
            .is_some_and(|map| map.contains_key("response") && map.contains_key("success"));

        let reply = if is_reply {
            serde_json::from_value(saved).context("saved gateway reply has an unexpected shape")?
        } else {
            GatewayReply {
                success: true,
                error: None,
                response: AgentResponse {
                    status: STATUS_SUCCESS.to_string(),
                    message: None,
                    result: saved,
                },
            }
        };

        Ok(Self { reply })
    }
}

#[async_trait]
impl AgentGateway for ReplayGateway {
    async fn invoke(&self, _instruction: &str, agent_id: &str) -> anyhow::Result<GatewayReply> {
        tracing::debug!(agent_id, "replaying saved reply");
        Ok(self.reply.clone())
    }
}
