//! Low-level Pi-hole admin API client.
//!
//! Pi-hole's dashboard is backed by internal PHP scripts under
//! `/admin/scripts/pi-hole/php/` and by the older `/admin/api.php`. Neither is
//! documented or versioned, so this module sticks closely to what the
//! dashboard itself sends.
//!
//! # Authentication
//!
//! Two credential modes are supported:
//!
//! 1. **Password**: the client logs in through `/admin/index.php`, keeps the
//!    `PHPSESSID` cookie and scrapes the CSRF token from the returned HTML.
//!    Every script request then carries the cookie and a `token` form field.
//!    The same password, double SHA-256 hashed, is the `auth` query value for
//!    `api.php`.
//! 2. **API token**: the token from *Settings → API* is sent as the `auth`
//!    query value. Only the `api.php` endpoints accept it, so groups and the
//!    domain lists are unavailable in this mode.
//!
//! A session ID obtained elsewhere can be reused with
//! [`ClientConfig::session_id`] to skip the password login.

mod ad_block;
pub mod auth;
mod domains;
mod groups;
mod local;
pub mod wire;

use core::fmt;

use reqwest::header::COOKIE;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::HttpClientConfig;

pub use auth::{double_hash256, extract_token, parse_session_cookie, Session};
pub use local::LocalEntry;

/// Default URL the Pi-hole dashboard is reachable at on a local network.
pub const DEFAULT_URL: &str = "http://pi.hole";

/// Errors that may occur when talking to a Pi-hole.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP request error occurred.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Logging in to the admin dashboard failed.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// The client is missing configuration or state it needs.
    #[error("client validation failed: {0}")]
    ClientValidation(String),

    /// Provider configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// Pi-hole rejected the credentials sent with the request.
    #[error("Pi-hole rejected the credentials")]
    Unauthorized,

    /// The requested object does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Pi-hole answered with `success: false`.
    #[error("Pi-hole returned an error: {0}")]
    Api(String),

    /// Group names must not contain whitespace.
    #[error("invalid group name {0:?}: group names must not be empty or contain spaces")]
    InvalidGroupName(String),

    /// Pi-hole did not acknowledge the requested blocking state.
    #[error("ad blocking could not be turned to {0:?}")]
    AdBlockToggle(&'static str),

    /// The resource can only be managed with a password session.
    #[error("resource is not implemented for the API token client: {0}")]
    NotImplementedForToken(&'static str),

    /// Recreating a record failed; the original was put back.
    #[error("update failed, original record restored: {0}")]
    UpdateRolledBack(Box<ApiError>),

    /// Recreating a record failed and so did putting the original back.
    #[error("update failed ({update}) and restoring the original record failed: {rollback}")]
    UpdateRollbackFailed {
        update: Box<ApiError>,
        rollback: Box<ApiError>,
    },
}

impl ApiError {
    /// Returns `true` if this error means the object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// How the client proves its identity to Pi-hole.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Admin dashboard password.
    Password(String),
    /// Static API token (the double hashed password).
    ApiToken(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Password(_) => f.write_str("Password(<redacted>)"),
            Credentials::ApiToken(_) => f.write_str("ApiToken(<redacted>)"),
        }
    }
}

/// Configuration for [`Client`].
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Base URL of the Pi-hole, e.g. `http://pi.hole`.
    pub url: String,
    /// Admin password. Mutually exclusive with `api_token`.
    pub password: Option<String>,
    /// API token. Mutually exclusive with `password`.
    pub api_token: Option<String>,
    /// Existing `PHPSESSID` to reuse instead of logging in.
    pub session_id: Option<String>,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
    /// HTTP client options.
    pub http: HttpClientConfig,
}

impl ClientConfig {
    /// Configuration for password (session) authentication.
    pub fn with_password(url: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            password: Some(password.into()),
            ..Default::default()
        }
    }

    /// Configuration for API token authentication.
    pub fn with_api_token(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_token: Some(token.into()),
            ..Default::default()
        }
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("session_id", &self.session_id.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("http", &self.http)
            .finish()
    }
}

/// Pi-hole API client.
pub struct Client {
    http_client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    /// Value of the `auth` query parameter.
    web_password: String,
    resume_session_id: Option<String>,
    session: Option<Session>,
    /// Pi-hole rewrites its dnsmasq include files on every local record delete.
    delete_lock: Mutex<()>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("session", &self.session.as_ref().map(|_| "<active>"))
            .finish()
    }
}

/// The user agent sent when none is configured.
pub fn default_user_agent() -> String {
    format!("pihole-rs/{}", env!("CARGO_PKG_VERSION"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Client {
    /// Creates a client without contacting the Pi-hole.
    ///
    /// Call [`Client::init`] before issuing session requests, or use
    /// [`Client::connect`] to do both.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::ClientValidation("Pi-hole URL is not set".to_string()));
        }

        let credentials = match (non_empty(config.password), non_empty(config.api_token)) {
            (Some(password), None) => Credentials::Password(password),
            (None, Some(token)) => Credentials::ApiToken(token),
            (None, None) => {
                return Err(ApiError::ClientValidation(
                    "either a password or an API token must be set".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(ApiError::ClientValidation(
                    "password and API token are mutually exclusive".to_string(),
                ))
            }
        };

        let web_password = match &credentials {
            Credentials::Password(password) => double_hash256(password),
            Credentials::ApiToken(token) => token.clone(),
        };

        let user_agent = config.user_agent.unwrap_or_else(default_user_agent);
        let http_client = config.http.build_client(&user_agent)?;

        Ok(Self {
            http_client,
            base_url,
            credentials,
            web_password,
            resume_session_id: non_empty(config.session_id),
            session: None,
            delete_lock: Mutex::new(()),
        })
    }

    /// Creates a client and authenticates it.
    pub async fn connect(config: ClientConfig) -> Result<Self, ApiError> {
        let mut client = Self::new(config)?;
        client.init().await?;
        Ok(client)
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns `true` when the client authenticates with an API token only.
    pub fn is_token_client(&self) -> bool {
        matches!(self.credentials, Credentials::ApiToken(_))
    }

    /// Returns the value sent as the `auth` query parameter.
    pub fn auth_token(&self) -> &str {
        &self.web_password
    }

    /// Returns the active dashboard session, if logged in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds an unauthenticated form-encoded request.
    pub fn request(&self, method: Method, path: &str, form: &[(&str, &str)]) -> RequestBuilder {
        self.http_client.request(method, self.url(path)).form(form)
    }

    /// Builds a request authenticated with the dashboard session.
    ///
    /// The CSRF token is sent as the first form field, followed by `form`.
    pub fn request_with_session(
        &self,
        method: Method,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<RequestBuilder, ApiError> {
        let session = self.session.as_ref().ok_or_else(|| {
            ApiError::ClientValidation("no active session, call init() first".to_string())
        })?;

        let mut body = Vec::with_capacity(form.len() + 1);
        body.push(("token", session.token.as_str()));
        body.extend_from_slice(form);

        Ok(self
            .http_client
            .request(method, self.url(path))
            .header(COOKIE, format!("PHPSESSID={}", session.id))
            .form(&body))
    }

    /// Builds a request authenticated with the `auth` query parameter.
    ///
    /// `query` pairs and `auth` are appended after any query already in `path`.
    pub fn request_with_auth(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RequestBuilder, ApiError> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| ApiError::ClientValidation(format!("invalid Pi-hole URL: {}", e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("auth", &self.web_password);
        }

        Ok(self.http_client.request(method, url))
    }

    /// Sends a request and decodes its JSON body.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = request.build()?;
        debug!(
            method = %request.method(),
            path = request.url().path(),
            "sending Pi-hole request"
        );

        let response = self
            .http_client
            .execute(request)
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        // api.php answers a rejected `auth` value with HTTP 200 and `[]`
        if value.is_array() {
            return Err(ApiError::Unauthorized);
        }

        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Sends a request answered by a `{success, message}` object.
    async fn send_basic(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response: wire::BasicResponse = self.send_json(request).await?;
        response.into_result()
    }
}
