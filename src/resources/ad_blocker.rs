use std::sync::Arc;

use super::Resource;
use crate::api::{ApiError, Client};
use crate::types::AdBlockStatus;

/// Identifier of the singleton ad-blocker resource.
pub const AD_BLOCKER_ID: &str = "ad-block-enabled";

/// The blocker's enabled/disabled state.
///
/// There is exactly one per Pi-hole. Deleting it leaves blocking as it is.
#[derive(Debug, Clone)]
pub struct AdBlockerResource {
    client: Arc<Client>,
}

impl AdBlockerResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

impl Resource for AdBlockerResource {
    type Spec = AdBlockStatus;
    type State = AdBlockStatus;

    fn id(_state: &AdBlockStatus) -> String {
        AD_BLOCKER_ID.to_string()
    }

    async fn create(&self, spec: &AdBlockStatus) -> Result<AdBlockStatus, ApiError> {
        self.client.set_ad_block_enabled(spec.enabled).await
    }

    async fn read(&self, _id: &str) -> Result<Option<AdBlockStatus>, ApiError> {
        self.client.get_ad_blocker_status().await.map(Some)
    }

    async fn update(&self, _id: &str, spec: &AdBlockStatus) -> Result<AdBlockStatus, ApiError> {
        self.client.set_ad_block_enabled(spec.enabled).await?;
        self.client.get_ad_blocker_status().await
    }

    async fn delete(&self, _id: &str) -> Result<(), ApiError> {
        Ok(())
    }
}
