//! Response shapes returned by the Pi-hole admin endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::ApiError;
use crate::types::{AdBlockStatus, Domain, DomainKind, Group};

/// `{"success": bool, "message": string}` returned by mutating actions.
#[derive(Debug, Deserialize)]
pub struct BasicResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl BasicResponse {
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Api(
                self.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

/// `{"data": [[a, b], ...]}` returned by the custom DNS and CNAME lists.
#[derive(Debug, Deserialize)]
pub struct PairListResponse {
    pub data: Vec<Vec<String>>,
}

impl PairListResponse {
    /// Splits each row into its first two columns.
    pub fn into_pairs(self) -> Result<Vec<(String, String)>, ApiError> {
        self.data
            .into_iter()
            .map(|row| {
                let mut columns = row.into_iter();
                match (columns.next(), columns.next()) {
                    (Some(first), Some(second)) => Ok((first, second)),
                    _ => Err(ApiError::Decode("expected a row with two columns".to_string())),
                }
            })
            .collect()
    }
}

/// Group list from `groups.php?action=get_groups`.
#[derive(Debug, Deserialize)]
pub struct GroupListResponse {
    pub data: Vec<GroupResponse>,
}

/// A row of the gravity `group` table.
#[derive(Debug, Deserialize)]
pub struct GroupResponse {
    pub id: i64,
    pub enabled: i64,
    pub name: String,
    #[serde(default)]
    pub date_added: i64,
    #[serde(default)]
    pub date_modified: i64,
    #[serde(default)]
    pub description: Option<String>,
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

impl From<GroupResponse> for Group {
    fn from(g: GroupResponse) -> Self {
        Group {
            id: g.id,
            enabled: g.enabled == 1,
            name: g.name,
            date_added: timestamp(g.date_added),
            date_modified: timestamp(g.date_modified),
            description: g.description.unwrap_or_default(),
        }
    }
}

/// Domain list from `groups.php?action=get_domains`.
#[derive(Debug, Deserialize)]
pub struct DomainListResponse {
    pub data: Vec<DomainResponse>,
}

/// A row of the gravity `domainlist` table.
#[derive(Debug, Deserialize)]
pub struct DomainResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub domain_type: i64,
    pub enabled: i64,
    pub domain: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub date_added: i64,
    #[serde(default)]
    pub date_modified: i64,
    #[serde(default)]
    pub groups: Vec<i64>,
}

impl TryFrom<DomainResponse> for Domain {
    type Error = ApiError;

    fn try_from(d: DomainResponse) -> Result<Self, Self::Error> {
        let (kind, wildcard) = DomainKind::from_code(d.domain_type).ok_or_else(|| {
            ApiError::Decode(format!(
                "unknown type {} for domain {:?}",
                d.domain_type, d.domain
            ))
        })?;

        Ok(Domain {
            id: d.id,
            kind,
            enabled: d.enabled == 1,
            domain: d.domain,
            comment: d.comment.unwrap_or_default(),
            date_added: timestamp(d.date_added),
            date_modified: timestamp(d.date_modified),
            wildcard,
            group_ids: d.groups,
        })
    }
}

/// `{"status": "enabled" | "disabled"}` from `api.php`.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl From<StatusResponse> for AdBlockStatus {
    fn from(s: StatusResponse) -> Self {
        AdBlockStatus {
            enabled: s.status == "enabled",
        }
    }
}
