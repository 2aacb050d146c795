//! Listener configuration.

use std::env;

use anyhow::{Context, Result};

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default log filter when neither `RUST_LOG` nor `LOG_LEVEL` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind and to report in the endpoint URL.
    pub host: String,
    /// Port to bind. `0` asks the OS for an ephemeral port.
    pub port: u16,
    /// Log filter directive used by the binary.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: 0,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Build the configuration from `DYNAMEM_HOST`, `DYNAMEM_PORT` and
    /// `LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let port = match lookup("DYNAMEM_PORT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid DYNAMEM_PORT: {raw}"))?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("DYNAMEM_HOST")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.host),
            port,
            log_level: lookup("LOG_LEVEL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.log_level),
        })
    }

    /// Set the bind host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the bind port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
