//! Mock-based tests for allow and deny list entries.
//!
//! `POST /admin/scripts/pi-hole/php/groups.php` with `action=get_domains`
//! and an optional `showtype` of `white` or `black`.

use crate::common::constants::*;
use crate::common::*;

use pihole::api::ApiError;
use pihole::types::DomainKind;
use serde_json::json;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, ResponseTemplate};

fn form(fields: &str) -> String {
    format!("token={}&{}", TEST_CSRF_TOKEN, fields)
}

#[tokio::test]
async fn test_list_all_domains() {
    let server = setup_mock_server().await;
    let client = password_client(&server).await;

    Mock::given(method("POST"))
        .and(path(GROUPS_PATH))
        .and(body_string(form("action=get_domains")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                mock_domain(1, 0, "good.example", &[0]),
                mock_domain(2, 1, "ads.example", &[0, 4]),
                mock_domain(3, 3, r"(\.|^)tracker\.example$", &[]),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let domains = client.list_domains(None).await.expect("Failed to list domains");
    assert_eq!(domains.len(), 3);

    assert_eq!(domains[0].kind, DomainKind::Allow);
    assert!(!domains[0].wildcard);
    assert_eq!(domains[1].kind, DomainKind::Deny);
    assert_eq!(domains[1].group_ids, vec![0, 4]);
    assert_eq!(domains[2].kind, DomainKind::Deny);
    assert!(domains[2].wildcard);
    assert!(domains[2].enabled);
}

#[tokio::test]
async fn test_list_denied_domains() {
    let server = setup_mock_server().await;
    let client = password_client(&server).await;

    Mock::given(method("POST"))
        .and(path(GROUPS_PATH))
        .and(body_string(form("action=get_domains&showtype=black")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [mock_domain(2, 1, "ads.example", &[0])]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let domains = client.list_domains(Some(DomainKind::Deny)).await.unwrap();
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].domain, "ads.example");
}

#[tokio::test]
async fn test_list_allowed_domains() {
    let server = setup_mock_server().await;
    let client = password_client(&server).await;

    Mock::given(method("POST"))
        .and(path(GROUPS_PATH))
        .and(body_string(form("action=get_domains&showtype=white")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.list_domains(Some(DomainKind::Allow)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_domain_type() {
    let server = setup_mock_server().await;
    let client = password_client(&server).await;

    Mock::given(method("POST"))
        .and(path(GROUPS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [mock_domain(1, 9, "odd.example", &[])]
        })))
        .mount(&server)
        .await;

    let result = client.list_domains(None).await;
    assert!(matches!(result, Err(ApiError::Decode(_))));
}
