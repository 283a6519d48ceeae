//! Client configuration.
//!
//! Resolved once at startup and passed into `UreqTransport` and
//! `ClinicClient`; nothing in the crate reads the environment afterwards.

use std::time::Duration;

use crate::error::ConfigError;

/// Base URL used when `CLINIC_API_URL` is not set (the host machine as seen
/// from an Android emulator).
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:8000";

pub const BASE_URL_ENV: &str = "CLINIC_API_URL";
pub const TIMEOUT_ENV: &str = "CLINIC_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        if base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(Self {
            base_url: base_url.trim().to_string(),
            timeout: None,
        })
    }

    /// Overall per-request timeout. `None` leaves the transport default.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(BASE_URL_ENV).ok().as_deref(),
            std::env::var(TIMEOUT_ENV).ok().as_deref(),
        )
    }

    fn from_values(base_url: Option<&str>, timeout_secs: Option<&str>) -> Result<Self, ConfigError> {
        let config = Self::new(base_url.unwrap_or(DEFAULT_BASE_URL))?;
        let timeout = match timeout_secs.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };
        Ok(config.with_timeout(timeout))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
