//! Server configuration.
//!
//! Command line flags and environment variables are resolved once at startup
//! into an immutable [`ServerConfig`] that is handed to the web server. Flags
//! take precedence over the environment, which takes precedence over defaults:
//!
//! | Setting       | Flag                  | Environment   | Default   |
//! |---------------|-----------------------|---------------|-----------|
//! | Port          | `-p`, `--port`        | `PORT`        | `8080`    |
//! | Bind address  | `-b`, `--bind`        | `BIND`        | `0.0.0.0` |
//! | Force HTTPS   | `-f`, `--force-https` | `FORCE_HTTPS` | `false`   |

use std::time::Duration;

use crate::cli::Cli;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Per-request deadline covering body read and response write.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of requests handled concurrently.
pub const DEFAULT_MAX_CONCURRENCY: usize = 100;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value '{0}': expected a number between 0 and 65535")]
    InvalidPort(String),
}

/// Resolved, read-only server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Present `https://` in the example commands of the index page
    pub force_https: bool,
    pub request_timeout: Duration,
    pub max_concurrency: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            force_https: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl ServerConfig {
    /// Resolve settings from parsed flags and an environment lookup.
    ///
    /// `env` is usually `|key| std::env::var(key).ok()`; tests pass a fixed map.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPort` if `PORT` is consulted and is not a valid
    /// port number.
    pub fn resolve<F>(cli: &Cli, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let port = match (cli.port, non_empty("PORT")) {
            (Some(port), _) => port,
            (None, Some(value)) => match value.trim().parse::<u16>() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::InvalidPort(value)),
            },
            (None, None) => DEFAULT_PORT,
        };

        let bind = cli
            .bind
            .clone()
            .or_else(|| non_empty("BIND"))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let force_https = cli.force_https || non_empty("FORCE_HTTPS").is_some();

        Ok(Self {
            bind,
            port,
            force_https,
            ..Self::default()
        })
    }

    /// Resolve settings against the process environment.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::resolve`].
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    /// The `bind:port` address the listener binds to. IPv6 literals are bracketed.
    #[must_use]
    pub fn listen_address(&self) -> String {
        if self.bind.contains(':') && !self.bind.starts_with('[') {
            format!("[{}]:{}", self.bind, self.port)
        } else {
            format!("{}:{}", self.bind, self.port)
        }
    }

    /// URL scheme shown in example commands.
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        if self.force_https {
            "https"
        } else {
            "http"
        }
    }
}
