//! Configuration handling for the front-end and the relay

use crate::gateway::EmailJsCredentials;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default relay API prefix used by the backend gateway
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// Which delivery path the front-end uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayKind {
    /// Same-origin relay holding the provider secrets
    Backend,
    /// EmailJS called directly with the public key
    Direct,
}

/// User configuration for the front-end
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// `backend` or `direct`
    pub gateway: Option<String>,
    /// Relay API prefix
    pub api_base_url: Option<String>,
    pub emailjs_service_id: Option<String>,
    pub emailjs_template_id: Option<String>,
    pub emailjs_public_key: Option<String>,
    /// Where progress is kept; platform data dir when unset
    pub storage_dir: Option<PathBuf>,
}

impl DiagnosticConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("br.com", "hodevweb", "hodev-diagnostic")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply `HODEV_*` overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                config = serde_json::from_str(&content)
                    .with_context(|| format!("invalid config file {}", path.display()))?;
            }
        }
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Environment values win over the file.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = read("HODEV_GATEWAY") {
            self.gateway = Some(v);
        }
        if let Some(v) = read("HODEV_API_BASE_URL") {
            self.api_base_url = Some(v);
        }
        if let Some(v) = read("HODEV_EMAILJS_SERVICE_ID") {
            self.emailjs_service_id = Some(v);
        }
        if let Some(v) = read("HODEV_EMAILJS_TEMPLATE_ID") {
            self.emailjs_template_id = Some(v);
        }
        if let Some(v) = read("HODEV_EMAILJS_PUBLIC_KEY") {
            self.emailjs_public_key = Some(v);
        }
        if let Some(v) = read("HODEV_STORAGE_DIR") {
            self.storage_dir = Some(PathBuf::from(v));
        }
    }

    pub fn gateway_kind(&self) -> GatewayKind {
        match self.gateway.as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("direct") || v.eq_ignore_ascii_case("emailjs") => {
                GatewayKind::Direct
            }
            _ => GatewayKind::Backend,
        }
    }

    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn emailjs_credentials(&self) -> EmailJsCredentials {
        EmailJsCredentials {
            service_id: self.emailjs_service_id.clone().unwrap_or_default(),
            template_id: self.emailjs_template_id.clone().unwrap_or_default(),
            public_key: self.emailjs_public_key.clone().unwrap_or_default(),
            private_key: None,
        }
    }
}

/// Relay settings, read from the environment only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub emailjs: EmailJsCredentials,
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            emailjs: EmailJsCredentials {
                service_id: String::new(),
                template_id: String::new(),
                public_key: String::new(),
                private_key: None,
            },
            rate_limit_max: 5,
            rate_limit_window: Duration::from_secs(15 * 60),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match read("PORT") {
            Some(v) => v.parse().map_err(|_| anyhow!("invalid PORT: {v}"))?,
            None => defaults.port,
        };
        let allowed_origins = match read("ALLOWED_ORIGINS") {
            Some(v) => v
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            None => defaults.allowed_origins,
        };
        let rate_limit_max = match read("RELAY_RATE_LIMIT_MAX") {
            Some(v) => v
                .parse()
                .map_err(|_| anyhow!("invalid RELAY_RATE_LIMIT_MAX: {v}"))?,
            None => defaults.rate_limit_max,
        };
        let rate_limit_window = match read("RELAY_RATE_LIMIT_WINDOW_SECS") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .map_err(|_| anyhow!("invalid RELAY_RATE_LIMIT_WINDOW_SECS: {v}"))?,
            ),
            None => defaults.rate_limit_window,
        };

        Ok(Self {
            port,
            allowed_origins,
            emailjs: EmailJsCredentials {
                service_id: read("EMAILJS_SERVICE_ID").unwrap_or_default(),
                template_id: read("EMAILJS_TEMPLATE_ID").unwrap_or_default(),
                public_key: read("EMAILJS_PUBLIC_KEY").unwrap_or_default(),
                private_key: read("EMAILJS_PRIVATE_KEY"),
            },
            rate_limit_max,
            rate_limit_window,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
