//! Delivery through the same-origin mail relay

use super::{EmailMessage, GatewayError, GatewayReceipt, SubmissionGateway};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Deserialize)]
struct RelayReply {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub struct BackendGateway {
    client: reqwest::Client,
    base_url: String,
}

impl BackendGateway {
    /// `base_url` is the API prefix, e.g. `http://localhost:3001/api`.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(GatewayError::Configuration("missing relay base URL".into()));
        }
        Ok(Self {
            client: super::http_client()?,
            base_url: base_url.to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/send-email", self.base_url)
    }
}

#[async_trait]
impl SubmissionGateway for BackendGateway {
    async fn send_email(&self, message: &EmailMessage) -> Result<GatewayReceipt, GatewayError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(message)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        let reply: Option<RelayReply> = serde_json::from_str(&text).ok();
        if !status.is_success() {
            let message = reply.and_then(|r| r.error).unwrap_or(text);
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        let reply = reply.ok_or_else(|| GatewayError::Decode("relay reply is not JSON".into()))?;
        Ok(GatewayReceipt {
            status: status.as_u16(),
            message: reply.message.unwrap_or_default(),
        })
    }

    fn name(&self) -> &'static str {
        "backend"
    }
}
