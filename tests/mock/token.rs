//! Mock-based tests for API token clients.
//!
//! Token clients reach local records through
//! `GET /admin/api.php?customdns&action=...&auth=<token>` (and `customcname`).
//! `groups.php` requires a dashboard session, so groups and domain lists are
//! refused up front.

use std::sync::Arc;

use crate::common::constants::*;
use crate::common::*;

use pihole::api::ApiError;
use pihole::resources::{DnsRecordResource, Resource};
use pihole::types::{CnameRecord, DnsRecord, GroupCreateRequest};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_token_list_dns_records() {
    let server = setup_mock_server().await;
    let client = token_client(&server).await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("customdns", ""))
        .and(query_param("action", "get"))
        .and(query_param("auth", TEST_API_TOKEN))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(mock_pair_list(&[("nas.lan", "10.0.0.5")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let records = client.list_dns_records().await.unwrap();
    assert_eq!(records, vec![DnsRecord::new("nas.lan", "10.0.0.5".parse().unwrap())]);
}

#[tokio::test]
async fn test_token_create_cname_record() {
    let server = setup_mock_server().await;
    let client = token_client(&server).await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("customcname", ""))
        .and(query_param("action", "add"))
        .and(query_param("domain", "media.lan"))
        .and(query_param("target", "nas.lan"))
        .and(query_param("auth", TEST_API_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_success()))
        .expect(1)
        .mount(&server)
        .await;

    client
        .create_cname_record(&CnameRecord::new("media.lan", "nas.lan"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_token_delete_dns_record() {
    let server = setup_mock_server().await;
    let client = token_client(&server).await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("customdns", ""))
        .and(query_param("action", "get"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(mock_pair_list(&[("nas.lan", "10.0.0.5")])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("customdns", ""))
        .and(query_param("action", "delete"))
        .and(query_param("domain", "nas.lan"))
        .and(query_param("ip", "10.0.0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_success()))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_dns_record("nas.lan").await.unwrap();
}

#[tokio::test]
async fn test_token_groups_not_implemented() {
    let server = setup_mock_server().await;
    let client = token_client(&server).await;

    assert!(matches!(
        client.list_groups().await,
        Err(ApiError::NotImplementedForToken("groups"))
    ));
    assert!(matches!(
        client.create_group(&GroupCreateRequest::new("iot", "")).await,
        Err(ApiError::NotImplementedForToken(_))
    ));
    assert!(matches!(
        client.delete_group_by_id(3).await,
        Err(ApiError::NotImplementedForToken(_))
    ));
}

#[tokio::test]
async fn test_token_domains_not_implemented() {
    let server = setup_mock_server().await;
    let client = token_client(&server).await;

    match client.list_domains(None).await {
        Err(err @ ApiError::NotImplementedForToken(_)) => {
            assert!(err.to_string().contains("not implemented for the API token client"))
        }
        other => panic!("expected NotImplementedForToken, got {:?}", other),
    }
}

#[tokio::test]
async fn test_token_rejected_on_list() {
    let server = setup_mock_server().await;
    let client = token_client(&server).await;

    // a wrong token gets HTTP 200 with an empty array
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    assert!(matches!(
        client.list_dns_records().await,
        Err(ApiError::Unauthorized)
    ));
    assert!(matches!(
        client.list_cname_records().await,
        Err(ApiError::Unauthorized)
    ));
    assert!(matches!(
        client.get_ad_blocker_status().await,
        Err(ApiError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_token_rejected_is_not_read_as_gone() {
    let server = setup_mock_server().await;
    let client = Arc::new(token_client(&server).await);

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("customdns", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let records = DnsRecordResource::new(client);
    assert!(matches!(
        records.read("nas.lan").await,
        Err(ApiError::Unauthorized)
    ));
}
