//! Submission gateway: delivers finished forms as email
//!
//! Two interchangeable implementations sit behind [`SubmissionGateway`]:
//! the EmailJS REST API and the same-origin relay.

mod backend;
mod emailjs;
mod traits;

pub use backend::BackendGateway;
pub use emailjs::{EmailJsCredentials, EmailJsGateway, EMAILJS_SEND_URL};
pub use traits::SubmissionGateway;

#[cfg(test)]
pub use traits::MockSubmissionGateway;

use crate::config::{DiagnosticConfig, GatewayKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Request timeout for every outbound call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The four template fields every delivery path understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    /// RFC 3339
    pub timestamp: String,
}

/// Acknowledgement from the delivery path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReceipt {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No usable delivery path could be built
    #[error("gateway not configured: {0}")]
    Configuration(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

pub(crate) fn http_client() -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| GatewayError::Configuration(e.to_string()))
}

/// Build the gateway selected by configuration.
pub fn build_gateway(config: &DiagnosticConfig) -> Result<Arc<dyn SubmissionGateway>, GatewayError> {
    match config.gateway_kind() {
        GatewayKind::Backend => Ok(Arc::new(BackendGateway::new(&config.api_base_url())?)),
        GatewayKind::Direct => Ok(Arc::new(EmailJsGateway::new(config.emailjs_credentials())?)),
    }
}

#[cfg(test)]
impl EmailMessage {
    pub(crate) fn sample() -> Self {
        Self {
            name: "Ana".into(),
            email: "ana@mail.com".into(),
            phone: "+5571999998888".into(),
            message: "Quero um site novo".into(),
            timestamp: "2025-01-01T12:00:00+00:00".into(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_backend_by_default() {
        let gateway = build_gateway(&DiagnosticConfig::default()).unwrap();
        assert_eq!(gateway.name(), "backend");
    }

    #[test]
    fn test_direct_without_credentials_fails() {
        let config = DiagnosticConfig {
            gateway: Some("direct".into()),
            ..Default::default()
        };
        assert!(matches!(
            build_gateway(&config),
            Err(GatewayError::Configuration(_))
        ));
    }

    #[test]
    fn test_direct_with_credentials() {
        let config = DiagnosticConfig {
            gateway: Some("direct".into()),
            emailjs_service_id: Some("s".into()),
            emailjs_template_id: Some("t".into()),
            emailjs_public_key: Some("p".into()),
            ..Default::default()
        };
        assert_eq!(build_gateway(&config).unwrap().name(), "emailjs");
    }

    #[test]
    fn test_mock_gateway_is_object_safe() {
        let mut mock = MockSubmissionGateway::new();
        mock.expect_send_email().returning(|_| {
            Ok(GatewayReceipt {
                status: 200,
                message: "ok".into(),
            })
        });
        let gateway: Arc<dyn SubmissionGateway> = Arc::new(mock);
        let receipt = tokio_test::block_on(gateway.send_email(&EmailMessage::sample())).unwrap();
        assert_eq!(receipt.status, 200);
    }
}
