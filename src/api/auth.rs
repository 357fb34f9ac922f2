//! Dashboard login and credential helpers.

use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::Method;
use scraper::{Html, Selector};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::{ApiError, Client, Credentials};

const LOGIN_PATH: &str = "/admin/index.php?login=";
const INDEX_PATH: &str = "/admin/index.php";
const SESSION_COOKIE: &str = "PHPSESSID";

/// An authenticated dashboard session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Value of the `PHPSESSID` cookie.
    pub id: String,
    /// CSRF token embedded in the dashboard HTML.
    pub token: String,
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Session(<redacted>)")
    }
}

/// Hashes `data` with SHA-256 twice, hex encoding in between.
///
/// Pi-hole stores `WEBPASSWORD` this way and accepts it as the `auth` query
/// parameter of `api.php`.
pub fn double_hash256(data: &str) -> String {
    let first = hex::encode(Sha256::digest(data.as_bytes()));
    hex::encode(Sha256::digest(first.as_bytes()))
}

/// Extracts the cookie value from a `Set-Cookie` header.
pub fn parse_session_cookie(header: &str) -> Result<String, ApiError> {
    let (_, rest) = header
        .split_once('=')
        .ok_or_else(|| ApiError::LoginFailed("malformed session cookie".to_string()))?;

    let value = rest.split_once(';').map_or(rest, |(value, _)| value).trim();
    if value.is_empty() {
        return Err(ApiError::LoginFailed("malformed session cookie".to_string()));
    }

    Ok(value.to_string())
}

/// Extracts the CSRF token from the `#token` element of a dashboard page.
pub fn extract_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("#token").ok()?;
    let token: String = document.select(&selector).next()?.text().collect();

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Picks the session cookie out of the response headers.
///
/// A `PHPSESSID` cookie is preferred; otherwise the first cookie is used.
fn session_id_from_headers(headers: &HeaderMap) -> Result<String, ApiError> {
    let cookies: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();

    let cookie = cookies
        .iter()
        .find(|cookie| {
            cookie
                .trim_start()
                .strip_prefix(SESSION_COOKIE)
                .is_some_and(|rest| rest.starts_with('='))
        })
        .or_else(|| cookies.first())
        .ok_or_else(|| ApiError::LoginFailed("session ID not found in response".to_string()))?;

    parse_session_cookie(cookie)
}

impl Client {
    /// Authenticates the client.
    ///
    /// In password mode this reuses the configured session ID if there is one
    /// and logs in otherwise. Token clients need no setup.
    pub async fn init(&mut self) -> Result<(), ApiError> {
        if let Credentials::ApiToken(_) = self.credentials {
            return Ok(());
        }

        if self.session.is_none() {
            match self.resume_session_id.clone() {
                Some(session_id) => self.resume_session(&session_id).await?,
                None => self.login().await?,
            }
        }

        let session = self
            .session
            .as_ref()
            .ok_or_else(|| ApiError::ClientValidation("session not set".to_string()))?;

        if session.id.is_empty() {
            return Err(ApiError::ClientValidation("session ID not set".to_string()));
        }
        if session.token.is_empty() {
            return Err(ApiError::ClientValidation("token not set".to_string()));
        }

        Ok(())
    }

    /// Logs in to the dashboard, replacing any existing session.
    pub async fn login(&mut self) -> Result<(), ApiError> {
        let password = match &self.credentials {
            Credentials::Password(password) => password.clone(),
            Credentials::ApiToken(_) => {
                return Err(ApiError::ClientValidation(
                    "login requires a password".to_string(),
                ))
            }
        };

        debug!(url = %self.base_url, "logging in to Pi-hole dashboard");
        let response = self
            .request(Method::POST, LOGIN_PATH, &[("pw", password.as_str())])
            .send()
            .await
            .map_err(|e| ApiError::LoginFailed(format!("login request failed: {}", e)))?;

        let session_id = session_id_from_headers(response.headers())?;

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::LoginFailed(format!("failed to read login response: {}", e)))?;
        let token = extract_token(&body)
            .ok_or_else(|| ApiError::LoginFailed("invalid password".to_string()))?;

        info!(url = %self.base_url, "logged in to Pi-hole dashboard");
        self.session = Some(Session {
            id: session_id,
            token,
        });
        Ok(())
    }

    /// Reuses an existing `PHPSESSID`, fetching its CSRF token from the dashboard.
    pub async fn resume_session(&mut self, session_id: &str) -> Result<(), ApiError> {
        debug!(url = %self.base_url, "resuming Pi-hole dashboard session");
        let response = self
            .http_client
            .get(self.url(INDEX_PATH))
            .header(COOKIE, format!("{}={}", SESSION_COOKIE, session_id))
            .send()
            .await
            .map_err(|e| ApiError::LoginFailed(format!("session request failed: {}", e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::LoginFailed(format!("failed to read session response: {}", e)))?;
        let token = extract_token(&body)
            .ok_or_else(|| ApiError::LoginFailed("session expired or invalid".to_string()))?;

        self.session = Some(Session {
            id: session_id.to_string(),
            token,
        });
        Ok(())
    }
}
