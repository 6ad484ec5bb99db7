//! Configuration for Platinum controller connections

use crate::error::{PlatinumError, Result};
use serde::{Deserialize, Serialize};
use std::{env, time::Duration};

/// Default TCP port the Platinum gateway listens on
pub const DEFAULT_PORT: u16 = 522;

/// Default read deadline for controller sessions
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for a single Platinum controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatinumConfig {
    /// Controller hostname or IP address
    pub host: String,

    /// TCP port the controller listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Read deadline applied to every blocking read on a session
    #[serde(with = "humantime_serde", default = "default_read_timeout")]
    pub read_timeout: Duration,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_read_timeout() -> Duration {
    DEFAULT_READ_TIMEOUT
}

impl PlatinumConfig {
    /// Create a config for the given controller host and port
    pub fn new<S: Into<String>>(host: S, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Load configuration from `PLATINUM_HOST`, `PLATINUM_PORT` and
    /// `PLATINUM_TIMEOUT_SECS` environment variables
    pub fn from_env() -> Result<Self> {
        let host = env::var("PLATINUM_HOST")
            .map_err(|_| PlatinumError::invalid_input("PLATINUM_HOST not set"))?;

        let port = match env::var("PLATINUM_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| {
                PlatinumError::invalid_input(format!("Invalid PLATINUM_PORT '{raw}': {e}"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let read_timeout = match env::var("PLATINUM_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    PlatinumError::invalid_input(format!(
                        "Invalid PLATINUM_TIMEOUT_SECS '{raw}': {e}"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_READ_TIMEOUT,
        };

        let config = Self {
            host,
            port,
            read_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the config can produce a usable connection target
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(PlatinumError::invalid_input("Controller host is empty"));
        }
        if self.port == 0 {
            return Err(PlatinumError::invalid_input("Controller port is 0"));
        }
        Ok(())
    }

    /// Render the `host:port` connection target
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
