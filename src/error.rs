use thiserror::Error;

pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Everything that can end a dashboard action. All three kinds surface through
/// the same error slot; none of them is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The gateway call itself failed.
    #[error("{0}")]
    Transport(String),

    /// The gateway answered but `success` was false or `status` was not "success".
    #[error("{0}")]
    AgentFailure(String),

    /// A text envelope had no parseable fenced JSON block, or the result was
    /// not an object at all.
    #[error("malformed agent response: {0}")]
    MalformedResponse(String),
}

impl DashboardError {
    pub fn transport(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if message.trim().is_empty() {
            DashboardError::Transport(UNKNOWN_ERROR.to_string())
        } else {
            DashboardError::Transport(message)
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_falls_back_to_generic_message() {
        let err = anyhow::anyhow!("");
        assert_eq!(
            DashboardError::transport(&err).user_message(),
            UNKNOWN_ERROR
        );

        let err = anyhow::anyhow!("connection refused").context("agent gateway request failed");
        assert_eq!(
            DashboardError::transport(&err).user_message(),
            "agent gateway request failed: connection refused"
        );
    }

    #[test]
    fn malformed_response_is_prefixed() {
        let err = DashboardError::MalformedResponse("no fenced JSON block".to_string());
        assert_eq!(
            err.user_message(),
            "malformed agent response: no fenced JSON block"
        );
    }
}
