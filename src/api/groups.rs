//! Gravity database groups.

use reqwest::{Method, RequestBuilder};
use tracing::debug;

use super::wire::GroupListResponse;
use super::{ApiError, Client, Credentials};
use crate::types::{is_valid_group_name, Group, GroupCreateRequest, GroupUpdateRequest};

const GROUPS_PATH: &str = "/admin/scripts/pi-hole/php/groups.php";

impl Client {
    /// Builds a `groups.php` request. The script only accepts dashboard sessions.
    pub(super) fn groups_request(
        &self,
        resource: &'static str,
        form: &[(&str, &str)],
    ) -> Result<RequestBuilder, ApiError> {
        if let Credentials::ApiToken(_) = self.credentials {
            return Err(ApiError::NotImplementedForToken(resource));
        }
        self.request_with_session(Method::POST, GROUPS_PATH, form)
    }

    /// Lists all groups, including the built-in `Default` group.
    pub async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        let request = self.groups_request("groups", &[("action", "get_groups")])?;
        let response: GroupListResponse = self.send_json(request).await?;
        Ok(response.data.into_iter().map(Group::from).collect())
    }

    /// Returns the group named `name`.
    pub async fn get_group(&self, name: &str) -> Result<Group, ApiError> {
        self.list_groups()
            .await?
            .into_iter()
            .find(|g| g.name == name)
            .ok_or_else(|| ApiError::NotFound(format!("group with name {:?} not found", name)))
    }

    /// Returns the group with the given ID.
    pub async fn get_group_by_id(&self, id: i64) -> Result<Group, ApiError> {
        self.list_groups()
            .await?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("group with ID {} not found", id)))
    }

    /// Creates a group and returns it as stored.
    ///
    /// The name is trimmed and must not contain whitespace; Pi-hole would
    /// otherwise create one group per word.
    pub async fn create_group(&self, request: &GroupCreateRequest) -> Result<Group, ApiError> {
        let name = request.name.trim();
        if !is_valid_group_name(name) {
            return Err(ApiError::InvalidGroupName(request.name.clone()));
        }

        let form = [
            ("action", "add_group"),
            ("name", name),
            ("desc", request.description.as_str()),
        ];
        self.send_basic(self.groups_request("groups", &form)?).await?;

        debug!(name, "created group");
        self.get_group(name).await
    }

    /// Edits the group named `request.name`.
    pub async fn update_group(&self, request: &GroupUpdateRequest) -> Result<Group, ApiError> {
        let original = self.get_group(&request.name).await?;
        self.update_group_by_id(original.id, request).await
    }

    /// Edits the group with the given ID, renaming it to `request.name`.
    pub async fn update_group_by_id(
        &self,
        id: i64,
        request: &GroupUpdateRequest,
    ) -> Result<Group, ApiError> {
        let name = request.name.trim();
        if !is_valid_group_name(name) {
            return Err(ApiError::InvalidGroupName(request.name.clone()));
        }

        let status = if request.enabled.unwrap_or(true) {
            "1"
        } else {
            "0"
        };
        let id_field = id.to_string();
        let form = [
            ("action", "edit_group"),
            ("id", id_field.as_str()),
            ("name", name),
            ("desc", request.description.as_str()),
            ("status", status),
        ];
        self.send_basic(self.groups_request("groups", &form)?).await?;

        debug!(id, name, "updated group");
        self.get_group_by_id(id).await
    }

    /// Deletes the group named `name`.
    pub async fn delete_group(&self, name: &str) -> Result<(), ApiError> {
        let group = self.get_group(name).await?;
        self.delete_group_by_id(group.id).await
    }

    /// Deletes the group with the given ID.
    pub async fn delete_group_by_id(&self, id: i64) -> Result<(), ApiError> {
        let id_field = id.to_string();
        let form = [("action", "delete_group"), ("id", id_field.as_str())];
        self.send_basic(self.groups_request("groups", &form)?).await?;

        debug!(id, "deleted group");
        Ok(())
    }
}
