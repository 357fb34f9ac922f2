use std::sync::Arc;

use super::{found, Resource};
use crate::api::{ApiError, Client};
use crate::types::{Group, GroupCreateRequest, GroupUpdateRequest};

/// Desired state of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    pub name: String,
    pub description: String,
    pub enabled: bool,
}

impl GroupSpec {
    /// An enabled group with no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            enabled: true,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn update_request(&self) -> GroupUpdateRequest {
        GroupUpdateRequest {
            name: self.name.clone(),
            enabled: Some(self.enabled),
            description: self.description.clone(),
        }
    }
}

/// A gravity group, identified by its numeric ID.
#[derive(Debug, Clone)]
pub struct GroupResource {
    client: Arc<Client>,
}

impl GroupResource {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

fn parse_id(id: &str) -> Result<i64, ApiError> {
    id.trim()
        .parse()
        .map_err(|_| ApiError::ClientValidation(format!("invalid group ID {:?}", id)))
}

fn matches_spec(group: &Group, spec: &GroupSpec) -> bool {
    group.name == spec.name.trim()
        && group.description == spec.description
        && group.enabled == spec.enabled
}

impl Resource for GroupResource {
    type Spec = GroupSpec;
    type State = Group;

    fn id(state: &Group) -> String {
        state.id.to_string()
    }

    async fn create(&self, spec: &GroupSpec) -> Result<Group, ApiError> {
        if let Some(existing) = found(self.client.get_group(spec.name.trim()).await)? {
            if matches_spec(&existing, spec) {
                return Ok(existing);
            }
        }

        let group = self
            .client
            .create_group(&GroupCreateRequest::new(
                spec.name.clone(),
                spec.description.clone(),
            ))
            .await?;

        // add_group always creates enabled groups.
        if !spec.enabled {
            return self
                .client
                .update_group_by_id(group.id, &spec.update_request())
                .await;
        }

        Ok(group)
    }

    async fn read(&self, id: &str) -> Result<Option<Group>, ApiError> {
        found(self.client.get_group_by_id(parse_id(id)?).await)
    }

    async fn update(&self, id: &str, spec: &GroupSpec) -> Result<Group, ApiError> {
        self.client
            .update_group_by_id(parse_id(id)?, &spec.update_request())
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let id = parse_id(id)?;
        match found(self.client.get_group_by_id(id).await)? {
            Some(group) => self.client.delete_group_by_id(group.id).await,
            None => Ok(()),
        }
    }
}
