//! Idempotent lifecycle management for Pi-hole objects.
//!
//! Each resource maps a desired configuration onto the add/get/delete
//! primitives the admin API offers:
//!
//! | Resource | ID | Update strategy |
//! |----------|----|-----------------|
//! | [`DnsRecordResource`] | domain | delete + recreate, with rollback |
//! | [`CnameRecordResource`] | domain | delete + recreate, with rollback |
//! | [`GroupResource`] | numeric group ID | `edit_group` |
//! | [`AdBlockerResource`] | `ad-block-enabled` | enable/disable |
//!
//! `read` returns `Ok(None)` when the object no longer exists, and `delete`
//! succeeds when there is nothing left to delete.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pihole::api::{Client, ClientConfig};
//! use pihole::resources::{DnsRecordResource, Resource};
//! use pihole::types::DnsRecord;
//!
//! # async fn example() -> Result<(), pihole::ApiError> {
//! let config = ClientConfig::with_password("http://pi.hole", "pw");
//! let client = Arc::new(Client::connect(config).await?);
//! let records = DnsRecordResource::new(client);
//!
//! let state = records.create(&DnsRecord::new("nas.lan", "10.0.0.5".parse().unwrap())).await?;
//! let id = DnsRecordResource::id(&state);
//! records.update(&id, &DnsRecord::new("nas.lan", "10.0.0.6".parse().unwrap())).await?;
//! records.delete(&id).await?;
//! # Ok(())
//! # }
//! ```

mod ad_blocker;
mod cname_record;
mod dns_record;
mod group;

pub use ad_blocker::{AdBlockerResource, AD_BLOCKER_ID};
pub use cname_record::CnameRecordResource;
pub use dns_record::DnsRecordResource;
pub use group::{GroupResource, GroupSpec};

use std::future::Future;

use crate::ApiError;

/// A managed Pi-hole object.
///
/// Implementations may use `async fn`; the returned futures are `Send` so
/// resources can be driven from a multi-threaded runtime.
pub trait Resource: Sync {
    /// Desired configuration.
    type Spec: Sync;
    /// Observed configuration.
    type State: Send;

    /// Returns the identifier of an observed object.
    fn id(state: &Self::State) -> String;

    /// Creates the object, or adopts an identical existing one.
    fn create(
        &self,
        spec: &Self::Spec,
    ) -> impl Future<Output = Result<Self::State, ApiError>> + Send;

    /// Reads the object, returning `None` if it no longer exists.
    fn read(&self, id: &str) -> impl Future<Output = Result<Option<Self::State>, ApiError>> + Send;

    /// Brings the object identified by `id` in line with `spec`.
    fn update(
        &self,
        id: &str,
        spec: &Self::Spec,
    ) -> impl Future<Output = Result<Self::State, ApiError>> + Send;

    /// Deletes the object. Deleting a missing object succeeds.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Reads an existing object for adoption, failing if it does not exist.
    fn import(&self, id: &str) -> impl Future<Output = Result<Self::State, ApiError>> + Send {
        async move {
            self.read(id)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("cannot import {:?}: not found", id)))
        }
    }
}

/// Turns a `NotFound` error into `Ok(None)`.
pub(crate) fn found<T>(result: Result<T, ApiError>) -> Result<Option<T>, ApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Turns a `NotFound` error into success.
pub(crate) fn gone(result: Result<(), ApiError>) -> Result<(), ApiError> {
    match result {
        Err(err) if err.is_not_found() => Ok(()),
        other => other,
    }
}
