//! Common test utilities shared across test modules.
//!
//! This module provides helpers for setting up a mock Pi-hole, building
//! clients against it, and the JSON and HTML bodies the dashboard returns.

use pihole::api::{Client, ClientConfig};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sets up a new mock server for testing.
///
/// This is the standard way to create a mock server in tests.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Test constants used across multiple test modules.
#[allow(dead_code)]
pub mod constants {
    /// Dashboard password used in mock tests.
    pub const TEST_PASSWORD: &str = "test-password";

    /// Session cookie value handed out by the mock login.
    pub const TEST_SESSION_ID: &str = "test-session";

    /// CSRF token embedded in the mock dashboard HTML.
    pub const TEST_CSRF_TOKEN: &str = "csrf-token";

    /// API token used by token-mode tests.
    pub const TEST_API_TOKEN: &str = "api-token";

    /// `cookie` header value sent by session requests.
    pub const SESSION_COOKIE: &str = "PHPSESSID=test-session";

    pub const CUSTOM_DNS_PATH: &str = "/admin/scripts/pi-hole/php/customdns.php";
    pub const CUSTOM_CNAME_PATH: &str = "/admin/scripts/pi-hole/php/customcname.php";
    pub const GROUPS_PATH: &str = "/admin/scripts/pi-hole/php/groups.php";
    pub const API_PATH: &str = "/admin/api.php";
}

use constants::*;

/// A dashboard page embedding `token` the way Pi-hole does.
pub fn dashboard_html(token: &str) -> String {
    format!(
        r#"<!doctype html><html><body><div id="token" hidden>{}</div><p>Pi-hole</p></body></html>"#,
        token
    )
}

/// The login page Pi-hole renders for a wrong password.
pub fn login_page_html() -> String {
    r#"<!doctype html><html><body><form><input type="password" name="pw"></form></body></html>"#
        .to_string()
}

/// Mounts a successful password login.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/admin/index.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("PHPSESSID={}; path=/", TEST_SESSION_ID))
                .set_body_string(dashboard_html(TEST_CSRF_TOKEN)),
        )
        .mount(server)
        .await;
}

/// Logs in against `server` and returns the authenticated client.
pub async fn password_client(server: &MockServer) -> Client {
    mount_login(server).await;
    Client::connect(ClientConfig::with_password(server.uri(), TEST_PASSWORD))
        .await
        .expect("Failed to log in")
}

/// Returns a token-mode client for `server`.
pub async fn token_client(server: &MockServer) -> Client {
    Client::connect(ClientConfig::with_api_token(server.uri(), TEST_API_TOKEN))
        .await
        .expect("Failed to create token client")
}

/// `{"data": [[domain, value], ...]}`.
pub fn mock_pair_list(pairs: &[(&str, &str)]) -> Value {
    json!({
        "data": pairs.iter().map(|(a, b)| json!([a, b])).collect::<Vec<_>>()
    })
}

/// `{"success": true, "message": ""}`.
pub fn mock_success() -> Value {
    json!({"success": true, "message": ""})
}

/// `{"success": false, "message": message}`.
pub fn mock_failure(message: &str) -> Value {
    json!({"success": false, "message": message})
}

/// A `get_groups` row.
pub fn mock_group(id: i64, name: &str, enabled: bool, description: &str) -> Value {
    json!({
        "id": id,
        "enabled": if enabled { 1 } else { 0 },
        "name": name,
        "date_added": 1_650_000_000,
        "date_modified": 1_650_000_500,
        "description": description
    })
}

/// `{"data": [group, ...]}`.
pub fn mock_group_list(groups: Vec<Value>) -> Value {
    json!({ "data": groups })
}

/// A `get_domains` row.
pub fn mock_domain(id: i64, kind: i64, domain: &str, groups: &[i64]) -> Value {
    json!({
        "id": id,
        "type": kind,
        "enabled": 1,
        "domain": domain,
        "comment": "",
        "date_added": 1_650_000_000,
        "date_modified": 1_650_000_000,
        "groups": groups
    })
}

/// `{"status": "enabled" | "disabled"}`.
pub fn mock_status(enabled: bool) -> Value {
    json!({ "status": if enabled { "enabled" } else { "disabled" } })
}
