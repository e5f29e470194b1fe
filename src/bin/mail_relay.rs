//! HO DevWeb mail relay
//!
//! Same-origin proxy that keeps the EmailJS credentials off the client.

use anyhow::{Context, Result};
use hodev_diagnostic::config::RelayConfig;
use hodev_diagnostic::relay::{self, RelayState};
use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hodev_mail_relay=info,hodev_diagnostic=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = RelayConfig::from_env()?;
    let state = RelayState::from_config(&config).context("EmailJS is not configured")?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        %addr,
        origins = %config.allowed_origins.join(","),
        service_id = %config.emailjs.service_id,
        "Mail relay listening"
    );

    relay::serve(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutting down");
    })
    .await?;
    Ok(())
}
