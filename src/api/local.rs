//! Local DNS and CNAME records.
//!
//! Both live in dnsmasq include files Pi-hole manages and share one API shape:
//! `action=get` returns `{"data": [[domain, value], ...]}`, `add` and `delete`
//! take the domain plus its value and answer `{success, message}`. There is no
//! edit action, so updates delete the current entry and add the new one.

use std::net::IpAddr;

use reqwest::{Method, RequestBuilder};
use tracing::{debug, warn};

use super::wire::PairListResponse;
use super::{ApiError, Client, Credentials};
use crate::types::{CnameRecord, DnsRecord};

/// A record stored as a `(domain, value)` pair.
pub trait LocalEntry: Sized + Clone + PartialEq {
    /// Dashboard script handling this record type.
    const SCRIPT: &'static str;
    /// `api.php` list name for token clients.
    const API_LIST: &'static str;
    /// Form field holding the value.
    const VALUE_FIELD: &'static str;
    /// Human readable name used in errors.
    const NAME: &'static str;

    fn domain(&self) -> &str;

    fn value(&self) -> String;

    fn from_pair(domain: String, value: String) -> Result<Self, ApiError>;

    /// Whether this entry answers for `domain`.
    fn matches(&self, domain: &str) -> bool {
        self.domain() == domain
    }
}

impl LocalEntry for DnsRecord {
    const SCRIPT: &'static str = "/admin/scripts/pi-hole/php/customdns.php";
    const API_LIST: &'static str = "customdns";
    const VALUE_FIELD: &'static str = "ip";
    const NAME: &'static str = "dns record";

    fn domain(&self) -> &str {
        &self.domain
    }

    fn value(&self) -> String {
        self.ip.to_string()
    }

    fn from_pair(domain: String, value: String) -> Result<Self, ApiError> {
        let ip: IpAddr = value.trim().parse().map_err(|_| {
            ApiError::Decode(format!("invalid IP address {:?} for {:?}", value, domain))
        })?;
        Ok(DnsRecord { domain, ip })
    }
}

impl LocalEntry for CnameRecord {
    const SCRIPT: &'static str = "/admin/scripts/pi-hole/php/customcname.php";
    const API_LIST: &'static str = "customcname";
    const VALUE_FIELD: &'static str = "target";
    const NAME: &'static str = "cname";

    fn domain(&self) -> &str {
        &self.domain
    }

    fn value(&self) -> String {
        self.target.clone()
    }

    fn from_pair(domain: String, target: String) -> Result<Self, ApiError> {
        Ok(CnameRecord { domain, target })
    }

    // Pi-hole lowercases CNAME entries when it stores them.
    fn matches(&self, domain: &str) -> bool {
        self.domain.eq_ignore_ascii_case(domain)
    }
}

impl Client {
    fn local_request<E: LocalEntry>(
        &self,
        action: &str,
        fields: &[(&str, &str)],
    ) -> Result<RequestBuilder, ApiError> {
        let mut form = Vec::with_capacity(fields.len() + 1);
        form.push(("action", action));
        form.extend_from_slice(fields);

        match self.credentials {
            Credentials::Password(_) => self.request_with_session(Method::POST, E::SCRIPT, &form),
            Credentials::ApiToken(_) => self.request_with_auth(
                Method::GET,
                &format!("/admin/api.php?{}", E::API_LIST),
                &form,
            ),
        }
    }

    async fn list_local<E: LocalEntry>(&self) -> Result<Vec<E>, ApiError> {
        let request = self.local_request::<E>("get", &[])?;
        let response: PairListResponse = self.send_json(request).await?;

        response
            .into_pairs()?
            .into_iter()
            .map(|(domain, value)| E::from_pair(domain, value))
            .collect()
    }

    async fn get_local<E: LocalEntry>(&self, domain: &str) -> Result<E, ApiError> {
        self.list_local::<E>()
            .await?
            .into_iter()
            .find(|entry| entry.matches(domain))
            .ok_or_else(|| {
                ApiError::NotFound(format!("{} with domain {:?} not found", E::NAME, domain))
            })
    }

    async fn create_local<E: LocalEntry>(&self, entry: &E) -> Result<E, ApiError> {
        let value = entry.value();
        let request = self.local_request::<E>(
            "add",
            &[("domain", entry.domain()), (E::VALUE_FIELD, value.as_str())],
        )?;
        self.send_basic(request).await?;

        debug!(domain = entry.domain(), kind = E::NAME, "created local record");
        Ok(entry.clone())
    }

    async fn delete_entry<E: LocalEntry>(&self, entry: &E) -> Result<(), ApiError> {
        let _guard = self.delete_lock.lock().await;

        let value = entry.value();
        let request = self.local_request::<E>(
            "delete",
            &[("domain", entry.domain()), (E::VALUE_FIELD, value.as_str())],
        )?;
        self.send_basic(request).await?;

        debug!(domain = entry.domain(), kind = E::NAME, "deleted local record");
        Ok(())
    }

    async fn delete_local<E: LocalEntry>(&self, domain: &str) -> Result<(), ApiError> {
        let entry = self.get_local::<E>(domain).await?;
        self.delete_entry(&entry).await
    }

    /// Replaces the entry for `domain` with `new`, restoring it if the add fails.
    async fn update_local<E: LocalEntry>(&self, domain: &str, new: &E) -> Result<E, ApiError> {
        let current = self.get_local::<E>(domain).await?;
        if current == *new {
            return Ok(current);
        }

        self.delete_entry(&current).await?;

        match self.create_local(new).await {
            Ok(created) => Ok(created),
            Err(err) => {
                warn!(
                    domain,
                    kind = E::NAME,
                    error = %err,
                    "failed to create replacement record, restoring original"
                );
                match self.create_local(&current).await {
                    Ok(_) => Err(ApiError::UpdateRolledBack(Box::new(err))),
                    Err(rollback) => Err(ApiError::UpdateRollbackFailed {
                        update: Box::new(err),
                        rollback: Box::new(rollback),
                    }),
                }
            }
        }
    }

    /// Lists the custom DNS records.
    pub async fn list_dns_records(&self) -> Result<Vec<DnsRecord>, ApiError> {
        self.list_local().await
    }

    /// Returns the DNS record for `domain`, matched exactly.
    pub async fn get_dns_record(&self, domain: &str) -> Result<DnsRecord, ApiError> {
        self.get_local(domain).await
    }

    /// Creates a custom DNS record.
    pub async fn create_dns_record(&self, record: &DnsRecord) -> Result<DnsRecord, ApiError> {
        self.create_local(record).await
    }

    /// Deletes the DNS record for `domain`.
    pub async fn delete_dns_record(&self, domain: &str) -> Result<(), ApiError> {
        self.delete_local::<DnsRecord>(domain).await
    }

    /// Replaces the DNS record for `domain` with `record`.
    pub async fn update_dns_record(
        &self,
        domain: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord, ApiError> {
        self.update_local(domain, record).await
    }

    /// Lists the custom CNAME records.
    pub async fn list_cname_records(&self) -> Result<Vec<CnameRecord>, ApiError> {
        self.list_local().await
    }

    /// Returns the CNAME record for `domain`, ignoring case.
    pub async fn get_cname_record(&self, domain: &str) -> Result<CnameRecord, ApiError> {
        self.get_local(domain).await
    }

    /// Creates a CNAME record.
    pub async fn create_cname_record(
        &self,
        record: &CnameRecord,
    ) -> Result<CnameRecord, ApiError> {
        self.create_local(record).await
    }

    /// Deletes the CNAME record for `domain`.
    pub async fn delete_cname_record(&self, domain: &str) -> Result<(), ApiError> {
        self.delete_local::<CnameRecord>(domain).await
    }

    /// Replaces the CNAME record for `domain` with `record`.
    pub async fn update_cname_record(
        &self,
        domain: &str,
        record: &CnameRecord,
    ) -> Result<CnameRecord, ApiError> {
        self.update_local(domain, record).await
    }
}
