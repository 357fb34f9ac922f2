//! Allow and deny lists from the gravity database.

use super::wire::DomainListResponse;
use super::{ApiError, Client};
use crate::types::{Domain, DomainKind};

impl Client {
    /// Lists allow/deny list entries, optionally restricted to one list.
    pub async fn list_domains(&self, kind: Option<DomainKind>) -> Result<Vec<Domain>, ApiError> {
        let mut form = vec![("action", "get_domains")];
        if let Some(kind) = kind {
            form.push(("showtype", kind.show_type()));
        }

        let request = self.groups_request("domains", &form)?;
        let response: DomainListResponse = self.send_json(request).await?;

        response.data.into_iter().map(Domain::try_from).collect()
    }
}
