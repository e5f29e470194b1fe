//! Trait abstraction for email delivery to enable mocking in tests

use super::{EmailMessage, GatewayError, GatewayReceipt};
use async_trait::async_trait;

/// Delivers a finished form as an email
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Send one message. Failure is reported, never retried here.
    async fn send_email(&self, message: &EmailMessage) -> Result<GatewayReceipt, GatewayError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}
