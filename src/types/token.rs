//! ACL tokens.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire;
use super::{ContentHash, PolicyLink, RoleLink, ServiceIdentity};

/// An ACL token.
///
/// `accessor_id` and `secret_id` are assigned by the agent: leave both empty
/// when creating, and set `accessor_id` when updating.
///
/// The `Debug` output never includes the secret.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use consul_acl::types::{PolicyLink, Token};
///
/// let token = Token::new()
///     .with_description("ci runner")
///     .with_policy(PolicyLink::by_name("deploy"))
///     .with_expiration_ttl(Duration::from_secs(3600));
///
/// assert!(token.accessor_id.is_empty());
/// assert_eq!(token.policies.len(), 1);
/// ```
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Token {
    /// Index at which the token was created.
    pub create_index: u64,
    /// Index at which the token was last modified.
    pub modify_index: u64,
    /// Stable, non-secret identifier.
    #[serde(rename = "AccessorID")]
    pub accessor_id: String,
    /// The bearer credential.
    #[serde(rename = "SecretID")]
    pub secret_id: String,
    /// Free-form description.
    pub description: String,
    /// Policies linked to the token.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "wire::null_as_default"
    )]
    pub policies: Vec<PolicyLink>,
    /// Roles linked to the token.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "wire::null_as_default"
    )]
    pub roles: Vec<RoleLink>,
    /// Service identities granted to the token.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "wire::null_as_default"
    )]
    pub service_identities: Vec<ServiceIdentity>,
    /// Whether the token is local to its datacenter instead of replicated.
    pub local: bool,
    /// Lifetime requested at creation. The agent derives `expiration_time`.
    #[serde(
        rename = "ExpirationTTL",
        with = "wire::go_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_ttl: Option<Duration>,
    /// When the token expires, if ever.
    #[serde(with = "wire::go_time", skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
    /// When the token was created.
    #[serde(with = "wire::go_time", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    /// Content hash computed by the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<ContentHash>,
    /// Rules of a legacy token. Only present on tokens created through the
    /// legacy endpoints.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rules: String,
}

impl Token {
    /// Creates an empty token, ready to be filled in for creation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Links a policy.
    #[must_use]
    pub fn with_policy(mut self, policy: PolicyLink) -> Self {
        self.policies.push(policy);
        self
    }

    /// Links a role.
    #[must_use]
    pub fn with_role(mut self, role: RoleLink) -> Self {
        self.roles.push(role);
        self
    }

    /// Grants a service identity.
    #[must_use]
    pub fn with_service_identity(mut self, identity: ServiceIdentity) -> Self {
        self.service_identities.push(identity);
        self
    }

    /// Marks the token as local to its datacenter.
    #[must_use]
    pub fn with_local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    /// Requests an expiration relative to creation time.
    #[must_use]
    pub fn with_expiration_ttl(mut self, ttl: Duration) -> Self {
        self.expiration_ttl = Some(ttl);
        self
    }

    /// Returns `true` if this is a legacy token carrying inline rules.
    pub fn is_legacy(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Returns `true` if the token has an expiration time at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time.is_some_and(|at| at <= now)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.secret_id.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("Token")
            .field("accessor_id", &self.accessor_id)
            .field("secret_id", &secret)
            .field("description", &self.description)
            .field("policies", &self.policies)
            .field("roles", &self.roles)
            .field("service_identities", &self.service_identities)
            .field("local", &self.local)
            .field("expiration_time", &self.expiration_time)
            .field("create_index", &self.create_index)
            .field("modify_index", &self.modify_index)
            .finish_non_exhaustive()
    }
}

/// A token as returned by the list endpoint.
///
/// The secret is never part of a list entry. Read the token by accessor ID
/// for full detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TokenListEntry {
    /// Index at which the token was created.
    pub create_index: u64,
    /// Index at which the token was last modified.
    pub modify_index: u64,
    /// Stable, non-secret identifier.
    #[serde(rename = "AccessorID")]
    pub accessor_id: String,
    /// Free-form description.
    pub description: String,
    /// Policies linked to the token.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "wire::null_as_default"
    )]
    pub policies: Vec<PolicyLink>,
    /// Roles linked to the token.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "wire::null_as_default"
    )]
    pub roles: Vec<RoleLink>,
    /// Service identities granted to the token.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "wire::null_as_default"
    )]
    pub service_identities: Vec<ServiceIdentity>,
    /// Whether the token is local to its datacenter.
    pub local: bool,
    /// When the token expires, if ever.
    #[serde(with = "wire::go_time", skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
    /// When the token was created.
    #[serde(with = "wire::go_time", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    /// Content hash computed by the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<ContentHash>,
    /// Whether this is a legacy token.
    pub legacy: bool,
}
