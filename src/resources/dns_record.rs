use std::sync::Arc;

use super::{found, gone, Resource};
use crate::api::{ApiError, Client};
use crate::types::DnsRecord;

/// A local DNS record, identified by its domain.
#[derive(Debug, Clone)]
pub struct DnsRecordResource {
    client: Arc<Client>,
}

impl DnsRecordResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl Resource for DnsRecordResource {
    type Spec = DnsRecord;
    type State = DnsRecord;

    fn id(state: &DnsRecord) -> String {
        state.domain.clone()
    }

    async fn create(&self, spec: &DnsRecord) -> Result<DnsRecord, ApiError> {
        if let Some(existing) = found(self.client.get_dns_record(&spec.domain).await)? {
            if existing == *spec {
                return Ok(existing);
            }
        }
        self.client.create_dns_record(spec).await
    }

    async fn read(&self, id: &str) -> Result<Option<DnsRecord>, ApiError> {
        found(self.client.get_dns_record(id).await)
    }

    async fn update(&self, id: &str, spec: &DnsRecord) -> Result<DnsRecord, ApiError> {
        self.client.update_dns_record(id, spec).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        gone(self.client.delete_dns_record(id).await)
    }
}
