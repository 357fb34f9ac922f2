use std::sync::Arc;

use super::{found, gone, Resource};
use crate::api::{ApiError, Client};
use crate::types::CnameRecord;

/// A local CNAME record, identified by its (case-insensitive) domain.
#[derive(Debug, Clone)]
pub struct CnameRecordResource {
    client: Arc<Client>,
}

impl CnameRecordResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

fn same_record(a: &CnameRecord, b: &CnameRecord) -> bool {
    a.domain.eq_ignore_ascii_case(&b.domain) && a.target.eq_ignore_ascii_case(&b.target)
}

impl Resource for CnameRecordResource {
    type Spec = CnameRecord;
    type State = CnameRecord;

    fn id(state: &CnameRecord) -> String {
        state.domain.clone()
    }

    async fn create(&self, spec: &CnameRecord) -> Result<CnameRecord, ApiError> {
        if let Some(existing) = found(self.client.get_cname_record(&spec.domain).await)? {
            if same_record(&existing, spec) {
                return Ok(existing);
            }
        }
        self.client.create_cname_record(spec).await
    }

    async fn read(&self, id: &str) -> Result<Option<CnameRecord>, ApiError> {
        found(self.client.get_cname_record(id).await)
    }

    async fn update(&self, id: &str, spec: &CnameRecord) -> Result<CnameRecord, ApiError> {
        self.client.update_cname_record(id, spec).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        gone(self.client.delete_cname_record(id).await)
    }
}
