//! Read-only snapshots of Pi-hole state.
//!
//! A snapshot's `id` is the hex SHA-256 of its items serialized as JSON, so it
//! changes exactly when the listed content does.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::api::{ApiError, Client};
use crate::types::{CnameRecord, DnsRecord, Domain, DomainKind, Group};

/// A list of items with a content-derived identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot<T> {
    pub id: String,
    pub items: Vec<T>,
}

impl<T: Serialize> Snapshot<T> {
    pub fn new(items: Vec<T>) -> Result<Self, ApiError> {
        let json = serde_json::to_vec(&items).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Self {
            id: hex::encode(Sha256::digest(&json)),
            items,
        })
    }
}

/// All custom DNS records.
pub async fn dns_records(client: &Client) -> Result<Snapshot<DnsRecord>, ApiError> {
    Snapshot::new(client.list_dns_records().await?)
}

/// All CNAME records.
pub async fn cname_records(client: &Client) -> Result<Snapshot<CnameRecord>, ApiError> {
    Snapshot::new(client.list_cname_records().await?)
}

/// All groups, including `Default`.
pub async fn groups(client: &Client) -> Result<Snapshot<Group>, ApiError> {
    Snapshot::new(client.list_groups().await?)
}

/// Allow/deny list entries, optionally filtered to one list.
pub async fn domains(
    client: &Client,
    kind: Option<DomainKind>,
) -> Result<Snapshot<Domain>, ApiError> {
    Snapshot::new(client.list_domains(kind).await?)
}
