//! Direct delivery through the EmailJS REST API

use super::{EmailMessage, GatewayError, GatewayReceipt, SubmissionGateway};
use async_trait::async_trait;
use serde::Serialize;

/// Public EmailJS send endpoint
pub const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// EmailJS credentials. The private key is only used server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
    timestamp: &'a str,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

pub struct EmailJsGateway {
    client: reqwest::Client,
    endpoint: String,
    credentials: EmailJsCredentials,
}

impl EmailJsGateway {
    /// Fails with `Configuration` when any id is blank.
    pub fn new(credentials: EmailJsCredentials) -> Result<Self, GatewayError> {
        Self::with_endpoint(credentials, EMAILJS_SEND_URL)
    }

    pub fn with_endpoint(
        credentials: EmailJsCredentials,
        endpoint: &str,
    ) -> Result<Self, GatewayError> {
        let missing: Vec<&str> = [
            ("service_id", &credentials.service_id),
            ("template_id", &credentials.template_id),
            ("public_key", &credentials.public_key),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();
        if !missing.is_empty() {
            return Err(GatewayError::Configuration(format!(
                "missing EmailJS {}",
                missing.join(", ")
            )));
        }
        Ok(Self {
            client: super::http_client()?,
            endpoint: endpoint.to_string(),
            credentials,
        })
    }
}

#[async_trait]
impl SubmissionGateway for EmailJsGateway {
    async fn send_email(&self, message: &EmailMessage) -> Result<GatewayReceipt, GatewayError> {
        let body = SendRequest {
            service_id: &self.credentials.service_id,
            template_id: &self.credentials.template_id,
            user_id: &self.credentials.public_key,
            access_token: self.credentials.private_key.as_deref(),
            template_params: TemplateParams {
                name: &message.name,
                email: &message.email,
                phone: &message.phone,
                message: &message.message,
                timestamp: &message.timestamp,
            },
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        if !status.is_success() {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: text,
            });
        }
        Ok(GatewayReceipt {
            status: status.as_u16(),
            message: text,
        })
    }

    fn name(&self) -> &'static str {
        "emailjs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::test_support::{spawn_recorder, Recorded};
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    fn credentials() -> EmailJsCredentials {
        EmailJsCredentials {
            service_id: "service_x".into(),
            template_id: "template_y".into(),
            public_key: "pub".into(),
            private_key: None,
        }
    }

    #[test]
    fn test_blank_credentials_are_configuration_errors() {
        let mut creds = credentials();
        creds.template_id = "  ".into();
        creds.public_key = String::new();
        match EmailJsGateway::new(creds) {
            Err(GatewayError::Configuration(msg)) => {
                assert_eq!(msg, "missing EmailJS template_id, public_key")
            }
            _ => panic!("expected configuration error"),
        }
    }

    #[tokio::test]
    async fn test_posts_template_params() {
        let (url, recorded) = spawn_recorder(StatusCode::OK, "OK").await;
        let mut creds = credentials();
        creds.private_key = Some("secret".into());
        let gateway = EmailJsGateway::with_endpoint(creds, &url).unwrap();
        let receipt = gateway.send_email(&EmailMessage::sample()).await.unwrap();
        assert_eq!(receipt.status, 200);

        let Recorded { path, body } = recorded.lock().await.pop().unwrap();
        assert_eq!(path, "/");
        assert_eq!(body["service_id"], "service_x");
        assert_eq!(body["user_id"], "pub");
        assert_eq!(body["accessToken"], "secret");
        assert_eq!(body["template_params"]["name"], "Ana");
        assert_eq!(body["template_params"]["phone"], "+5571999998888");
    }

    #[tokio::test]
    async fn test_access_token_omitted_without_private_key() {
        let (url, recorded) = spawn_recorder(StatusCode::OK, "OK").await;
        let gateway = EmailJsGateway::with_endpoint(credentials(), &url).unwrap();
        gateway.send_email(&EmailMessage::sample()).await.unwrap();
        let Recorded { body, .. } = recorded.lock().await.pop().unwrap();
        assert!(body.get("accessToken").is_none());
    }

    #[tokio::test]
    async fn test_non_success_is_rejected() {
        let (url, _) = spawn_recorder(StatusCode::BAD_REQUEST, "The user ID is invalid").await;
        let gateway = EmailJsGateway::with_endpoint(credentials(), &url).unwrap();
        match gateway.send_email(&EmailMessage::sample()).await {
            Err(GatewayError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "The user ID is invalid");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
