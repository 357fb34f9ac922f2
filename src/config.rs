//! Environment-driven client configuration.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PIHOLE_URL` | `http://pi.hole` | Base URL of the Pi-hole |
//! | `PIHOLE_PASSWORD` | | Admin dashboard password |
//! | `PIHOLE_API_TOKEN` | | API token, instead of a password |
//! | `PIHOLE_CA_FILE` | | PEM file with an additional root certificate |
//! | `PIHOLE_TIMEOUT` | `30` | Request timeout in seconds |
//! | `__PIHOLE_SESSION_ID` | | Existing `PHPSESSID` to reuse |

use core::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{ApiError, Client, ClientConfig, DEFAULT_URL};
use crate::HttpClientConfig;

pub const ENV_URL: &str = "PIHOLE_URL";
pub const ENV_PASSWORD: &str = "PIHOLE_PASSWORD";
pub const ENV_API_TOKEN: &str = "PIHOLE_API_TOKEN";
pub const ENV_CA_FILE: &str = "PIHOLE_CA_FILE";
pub const ENV_TIMEOUT: &str = "PIHOLE_TIMEOUT";
pub const ENV_SESSION_ID: &str = "__PIHOLE_SESSION_ID";

/// Settings needed to reach and authenticate against a Pi-hole.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub password: Option<String>,
    pub api_token: Option<String>,
    pub ca_file: Option<PathBuf>,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("ca_file", &self.ca_file)
            .field("session_id", &self.session_id.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, treating empty values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = match get(ENV_TIMEOUT) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    ApiError::Config(format!(
                        "{} must be a number of seconds, got {:?}",
                        ENV_TIMEOUT, raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            url: get(ENV_URL).unwrap_or_else(|| DEFAULT_URL.to_string()),
            password: get(ENV_PASSWORD),
            api_token: get(ENV_API_TOKEN),
            ca_file: get(ENV_CA_FILE).map(PathBuf::from),
            session_id: get(ENV_SESSION_ID),
            user_agent: None,
            timeout,
        })
    }

    /// Resolves the configuration into a [`ClientConfig`], reading the CA file.
    pub fn client_config(&self) -> Result<ClientConfig, ApiError> {
        let mut http = HttpClientConfig::new();

        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        if let Some(ref path) = self.ca_file {
            let pem = std::fs::read(path).map_err(|e| {
                ApiError::Config(format!("failed to read CA file {:?}: {}", path, e))
            })?;
            http = http.root_certificate_pem(pem);
        }

        Ok(ClientConfig {
            url: self.url.clone(),
            password: self.password.clone(),
            api_token: self.api_token.clone(),
            session_id: self.session_id.clone(),
            user_agent: self.user_agent.clone(),
            http,
        })
    }

    /// Builds and authenticates a client.
    pub async fn client(&self) -> Result<Client, ApiError> {
        Client::connect(self.client_config()?).await
    }
}
