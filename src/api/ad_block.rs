//! Ad-blocker toggle through `api.php`.

use reqwest::Method;
use tracing::info;

use super::wire::StatusResponse;
use super::{ApiError, Client};
use crate::types::AdBlockStatus;

const STATUS_PATH: &str = "/admin/api.php?status";

impl Client {
    /// Returns whether ad blocking is currently enabled.
    pub async fn get_ad_blocker_status(&self) -> Result<AdBlockStatus, ApiError> {
        let response: StatusResponse = self
            .send_json(self.request(Method::GET, STATUS_PATH, &[]))
            .await?;
        Ok(response.into())
    }

    /// Turns ad blocking on or off.
    ///
    /// Pi-hole answers with the new status; anything other than the requested
    /// state is an error.
    pub async fn set_ad_block_enabled(&self, enable: bool) -> Result<AdBlockStatus, ApiError> {
        let (action, expected) = if enable {
            ("enable", "enabled")
        } else {
            ("disable", "disabled")
        };

        let request =
            self.request_with_auth(Method::GET, &format!("/admin/api.php?{}", action), &[])?;
        let response: StatusResponse = self.send_json(request).await?;

        if response.status != expected {
            return Err(ApiError::AdBlockToggle(action));
        }

        info!(status = expected, "changed ad blocking status");
        Ok(response.into())
    }
}
