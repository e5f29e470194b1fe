//! Same-origin mail relay
//!
//! Holds the EmailJS private key server-side and exposes `POST
//! /api/send-email` plus a health check. Every request is sanitized
//! before it is checked.

mod error;
mod handlers;
mod middleware;
mod rate_limit;

pub use error::RelayError;
pub use handlers::{SendEmailRequest, MSG_SENT};
pub use rate_limit::{RateLimitDecision, RateLimiter};

use crate::config::RelayConfig;
use crate::gateway::{EmailJsGateway, GatewayError, SubmissionGateway};
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Largest accepted JSON body; holds a diagnostic summary of
/// [`SUMMARY_MAX_LEN`](crate::sanitize::SUMMARY_MAX_LEN) four-byte characters
pub const BODY_LIMIT: usize = 80 * 1024;

#[derive(Clone)]
pub struct RelayState {
    pub gateway: Arc<dyn SubmissionGateway>,
    pub limiter: Arc<RateLimiter>,
    pub allowed_origins: Arc<Vec<String>>,
}

impl RelayState {
    pub fn new(config: &RelayConfig, gateway: Arc<dyn SubmissionGateway>) -> Self {
        Self {
            gateway,
            limiter: Arc::new(RateLimiter::new(
                config.rate_limit_max,
                config.rate_limit_window,
            )),
            allowed_origins: Arc::new(config.allowed_origins.clone()),
        }
    }

    /// Upstream is EmailJS; missing credentials fail here, not per request.
    pub fn from_config(config: &RelayConfig) -> Result<Self, GatewayError> {
        let gateway = EmailJsGateway::new(config.emailjs.clone())?;
        Ok(Self::new(config, Arc::new(gateway)))
    }

    fn is_allowed_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

pub fn build_router(state: RelayState) -> Router {
    let send = Router::new()
        .route("/api/send-email", post(handlers::send_email))
        .route_layer(from_fn_with_state(state.clone(), rate_limit::enforce));

    Router::new()
        .merge(send)
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(from_fn_with_state(state.clone(), middleware::cors))
        .layer(from_fn(middleware::security_headers))
        .layer(from_fn(middleware::trace_request))
        .with_state(state)
}

/// Serve until `shutdown` resolves. Client addresses feed the rate limiter.
pub async fn serve(
    listener: TcpListener,
    state: RelayState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::gateway::MockSubmissionGateway;
    use std::time::Duration;

    pub fn config(max: u32) -> RelayConfig {
        RelayConfig {
            allowed_origins: vec!["https://hodevweb.com.br".into()],
            rate_limit_max: max,
            rate_limit_window: Duration::from_secs(900),
            ..RelayConfig::default()
        }
    }

    /// Start the relay on an ephemeral port; returns its base URL.
    pub async fn spawn_relay(config: &RelayConfig, mock: MockSubmissionGateway) -> String {
        let state = RelayState::new(config, Arc::new(mock));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, state, std::future::pending()));
        format!("http://{addr}")
    }
}
