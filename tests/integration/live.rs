//! Integration tests for a Pi-hole v5 dashboard.
//!
//! # Environment Variables
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `PIHOLE_URL` | Yes | Base URL of the Pi-hole |
//! | `PIHOLE_PASSWORD` | Yes | Admin dashboard password |
//!
//! Records and groups are created under random `test-*` names and removed
//! again when each test finishes.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use pihole::api::{double_hash256, Client, ClientConfig};
use pihole::resources::{CnameRecordResource, DnsRecordResource, GroupResource, GroupSpec, Resource};
use pihole::types::{CnameRecord, DnsRecord, DomainKind};
use pihole::{data_sources, Config};

/// Loads the environment, returning the password client's configuration.
fn get_test_config() -> Option<Config> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let config = Config::from_env().ok()?;
    config.password.as_ref()?;
    Some(config)
}

async fn password_client() -> Client {
    let config = get_test_config().expect("PIHOLE_URL and PIHOLE_PASSWORD must be set in .env");
    config.client().await.expect("Failed to log in to Pi-hole")
}

async fn token_client() -> Client {
    let config = get_test_config().expect("PIHOLE_URL and PIHOLE_PASSWORD must be set in .env");
    let password = config.password.unwrap_or_default();
    Client::connect(ClientConfig::with_api_token(config.url, double_hash256(&password)))
        .await
        .expect("Failed to create token client")
}

fn random_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    format!("{:08x}", nanos)
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
#[ignore = "requires PIHOLE_URL and PIHOLE_PASSWORD in .env"]
async fn test_login() {
    let client = password_client().await;
    let session = client.session().expect("No session after login");
    assert!(!session.id.is_empty());
    assert!(!session.token.is_empty());
}

#[tokio::test]
#[ignore = "requires PIHOLE_URL in .env"]
async fn test_invalid_password() {
    let config = get_test_config().expect("PIHOLE_URL and PIHOLE_PASSWORD must be set in .env");
    let result =
        Client::connect(ClientConfig::with_password(config.url, "definitely-not-it")).await;
    assert!(result.is_err(), "Expected error with invalid password");
}

// =============================================================================
// Local Records
// =============================================================================

#[tokio::test]
#[ignore = "requires PIHOLE_URL and PIHOLE_PASSWORD in .env"]
async fn test_dns_record_lifecycle() {
    let client = Arc::new(password_client().await);
    let resource = DnsRecordResource::new(client.clone());

    let domain = format!("test-{}.lan", random_suffix());
    let record = DnsRecord::new(domain.clone(), "127.0.0.1".parse().unwrap());

    let state = resource.create(&record).await.expect("Failed to create record");
    println!("Created {}", state);

    let updated = resource
        .update(&domain, &DnsRecord::new(domain.clone(), "127.0.0.2".parse().unwrap()))
        .await
        .expect("Failed to update record");
    assert_eq!(updated.ip.to_string(), "127.0.0.2");

    let listed = data_sources::dns_records(&client).await.unwrap();
    assert!(listed.items.iter().any(|r| r.domain == domain));

    resource.delete(&domain).await.expect("Failed to delete record");
    assert_eq!(resource.read(&domain).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires PIHOLE_URL and PIHOLE_PASSWORD in .env"]
async fn test_cname_record_with_token_client() {
    let client = Arc::new(token_client().await);
    let resource = CnameRecordResource::new(client);

    let domain = format!("test-{}.com", random_suffix());
    let target = format!("Target-{}.com", random_suffix());

    resource
        .create(&CnameRecord::new(domain.clone(), target.clone()))
        .await
        .expect("Failed to create CNAME");

    let cname = resource.read(&domain).await.unwrap().expect("CNAME missing");
    assert_eq!(cname.domain, domain.to_lowercase());
    assert_eq!(cname.target, target.to_lowercase());

    resource.delete(&domain).await.expect("Failed to delete CNAME");
}

// =============================================================================
// Groups and Domains
// =============================================================================

#[tokio::test]
#[ignore = "requires PIHOLE_URL and PIHOLE_PASSWORD in .env"]
async fn test_group_lifecycle() {
    let client = Arc::new(password_client().await);
    let resource = GroupResource::new(client);

    let name = format!("test-{}", random_suffix());
    let group = resource
        .create(&GroupSpec::new(name.clone()).description("integration"))
        .await
        .expect("Failed to create group");
    assert!(group.enabled);

    let id = GroupResource::id(&group);
    let updated = resource
        .update(&id, &GroupSpec::new(name.clone()).enabled(false))
        .await
        .expect("Failed to update group");
    assert!(!updated.enabled);
    assert_eq!(updated.id, group.id);

    resource.delete(&id).await.expect("Failed to delete group");
    assert_eq!(resource.read(&id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires PIHOLE_URL and PIHOLE_PASSWORD in .env"]
async fn test_list_domains() {
    let client = password_client().await;

    let all = client.list_domains(None).await.expect("Failed to list domains");
    let denied = client.list_domains(Some(DomainKind::Deny)).await.unwrap();
    assert!(denied.len() <= all.len());
    assert!(denied.iter().all(|d| d.kind == DomainKind::Deny));
}

#[tokio::test]
#[ignore = "requires PIHOLE_URL and PIHOLE_PASSWORD in .env"]
async fn test_ad_blocker_status() {
    let client = password_client().await;
    let status = client.get_ad_blocker_status().await.expect("Failed to read status");
    println!("Ad blocking enabled: {}", status.enabled);
}
