//! Records managed on a Pi-hole.
//!
//! These are the decoded, typed forms of what the admin endpoints return. The
//! raw wire shapes live in [`crate::api`]; everything here is independent of
//! how it was fetched.

use core::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A local DNS (A/AAAA) record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Domain the record answers for.
    pub domain: String,
    /// Address returned for the domain.
    pub ip: IpAddr,
}

impl DnsRecord {
    /// Creates a new DNS record.
    pub fn new(domain: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            domain: domain.into(),
            ip,
        }
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.domain, self.ip)
    }
}

/// A local CNAME record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CnameRecord {
    /// Alias domain.
    pub domain: String,
    /// Canonical name the alias points at.
    pub target: String,
}

impl CnameRecord {
    /// Creates a new CNAME record.
    pub fn new(domain: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for CnameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.domain, self.target)
    }
}

/// A gravity database group.
///
/// Groups associate clients with allow/deny lists and adlists. Group `0` is the
/// built-in `Default` group and cannot be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub enabled: bool,
    pub name: String,
    pub date_added: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub description: String,
}

/// Parameters for creating a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupCreateRequest {
    pub name: String,
    pub description: String,
}

impl GroupCreateRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Parameters for editing a group.
///
/// `enabled` defaults to `true` when left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupUpdateRequest {
    pub name: String,
    pub enabled: Option<bool>,
    pub description: String,
}

/// Checks that a group name contains no whitespace once trimmed.
pub fn is_valid_group_name(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

/// Which list a domain entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    /// Whitelisted domains.
    Allow,
    /// Blacklisted domains.
    Deny,
}

impl DomainKind {
    /// Decodes a gravity `domainlist.type` code into its list and wildcard flag.
    ///
    /// | Code | List | Wildcard |
    /// |------|------|----------|
    /// | 0 | allow | no |
    /// | 1 | deny | no |
    /// | 2 | allow | yes |
    /// | 3 | deny | yes |
    pub const fn from_code(code: i64) -> Option<(Self, bool)> {
        match code {
            0 => Some((Self::Allow, false)),
            1 => Some((Self::Deny, false)),
            2 => Some((Self::Allow, true)),
            3 => Some((Self::Deny, true)),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }

    /// The `showtype` value the groups endpoint uses to filter this list.
    pub(crate) const fn show_type(&self) -> &'static str {
        match self {
            Self::Allow => "white",
            Self::Deny => "black",
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`DomainKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown domain type {0:?}, expected one of [\"allow\", \"deny\"]")]
pub struct ParseDomainKindError(pub String);

impl FromStr for DomainKind {
    type Err = ParseDomainKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(Self::Allow),
            "deny" => Ok(Self::Deny),
            other => Err(ParseDomainKindError(other.to_string())),
        }
    }
}

/// An allow or deny list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: i64,
    pub kind: DomainKind,
    pub enabled: bool,
    pub domain: String,
    pub comment: String,
    pub date_added: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    /// Whether `domain` is interpreted as a regex/wildcard rather than verbatim.
    pub wildcard: bool,
    pub group_ids: Vec<i64>,
}

/// Whether the blocker is currently filtering queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdBlockStatus {
    pub enabled: bool,
}
