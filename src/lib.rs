//! Typed client for the Pi-hole web admin API.
//!
//! Pi-hole does not publish a stable management API. Its admin dashboard talks
//! to a handful of internal PHP endpoints using form-encoded requests, a PHP
//! session cookie and a CSRF token embedded in the dashboard HTML. The older
//! `api.php` endpoint additionally accepts a static `auth` query parameter.
//! This crate wraps both surfaces behind one [`api::Client`]:
//!
//! - [`api::Client`] performs login, builds authenticated requests and decodes
//!   the positional JSON responses into the records in [`types`].
//! - [`resources`] layers idempotent create/read/update/delete semantics on
//!   top, including delete-and-recreate updates with rollback.
//! - [`data_sources`] produces read-only snapshots with stable identifiers.
//! - [`config`] builds a ready client from the `PIHOLE_*` environment.
//!
//! # Example
//!
//! ```no_run
//! use pihole::api::{Client, ClientConfig};
//! use pihole::types::DnsRecord;
//!
//! # async fn example() -> Result<(), pihole::api::ApiError> {
//! let client = Client::connect(ClientConfig::with_password("http://pi.hole", "secret")).await?;
//!
//! let record = DnsRecord::new("nas.lan", "192.168.1.20".parse().unwrap());
//! client.create_dns_record(&record).await?;
//!
//! for record in client.list_dns_records().await? {
//!     println!("{} -> {}", record.domain, record.ip);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cli` | The `pihole` command line binary (default) |
//! | `default-tls` | reqwest's default TLS backend (default) |
//! | `rustls-tls` | TLS through rustls |
//! | `native-tls` | TLS through the platform library |
//! | `native-tls-vendored` | `native-tls` with a vendored OpenSSL |

use std::net::IpAddr;
use std::time::Duration;

pub mod api;
pub mod config;
pub mod data_sources;
pub mod resources;
pub mod types;

pub use api::{ApiError, Client, ClientConfig};
pub use config::Config;
pub use resources::Resource;

/// Default request timeout used when [`HttpClientConfig::timeout`] is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client configuration shared by every request the client makes.
///
/// # Example
///
/// ```
/// use pihole::HttpClientConfig;
/// use std::time::Duration;
///
/// let config = HttpClientConfig::new()
///     .local_address("192.168.1.100".parse().unwrap())
///     .timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout, Some(Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Local IP address to bind outgoing connections to.
    pub local_address: Option<IpAddr>,
    /// Network interface to bind outgoing connections to.
    pub interface: Option<String>,
    /// Per-request timeout. Defaults to [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
    /// Additional PEM encoded root certificate, for Pi-holes behind a private CA.
    pub root_certificate_pem: Option<Vec<u8>>,
}

impl HttpClientConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds outgoing connections to the given local address.
    pub fn local_address(mut self, addr: IpAddr) -> Self {
        self.local_address = Some(addr);
        self
    }

    /// Binds outgoing connections to the given network interface.
    pub fn interface(mut self, iface: impl Into<String>) -> Self {
        self.interface = Some(iface.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Trusts an additional PEM encoded root certificate.
    pub fn root_certificate_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.root_certificate_pem = Some(pem.into());
        self
    }

    pub(crate) fn build_client(&self, user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));

        if let Some(addr) = self.local_address {
            builder = builder.local_address(addr);
        }

        #[cfg(any(
            target_os = "android",
            target_os = "fuchsia",
            target_os = "linux",
            target_os = "macos",
            target_os = "ios",
            target_os = "tvos",
            target_os = "watchos",
            target_os = "illumos",
            target_os = "solaris",
        ))]
        if let Some(ref iface) = self.interface {
            builder = builder.interface(iface);
        }

        #[cfg(any(
            feature = "default-tls",
            feature = "rustls-tls",
            feature = "native-tls",
            feature = "native-tls-vendored",
        ))]
        if let Some(ref pem) = self.root_certificate_pem {
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(pem)?);
        }

        builder.build()
    }
}
