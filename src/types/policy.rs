//! ACL policies.

use serde::{Deserialize, Serialize};

use super::ContentHash;
use super::wire;

/// An ACL policy: a named set of rules.
///
/// `id` is assigned by the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Policy {
    /// Server-assigned ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Unique name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Rules in HCL or JSON.
    pub rules: String,
    /// Datacenters the policy is valid in. Empty means all.
    #[serde(deserialize_with = "wire::null_as_default")]
    pub datacenters: Vec<String>,
    /// Content hash computed by the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<ContentHash>,
    /// Index at which the policy was created.
    pub create_index: u64,
    /// Index at which the policy was last modified.
    pub modify_index: u64,
}

impl Policy {
    /// Creates a policy with the given name and rules.
    ///
    /// ```rust
    /// use consul_acl::types::Policy;
    ///
    /// let policy = Policy::new("kv-read", r#"key_prefix "" { policy = "read" }"#)
    ///     .with_description("read the whole KV store");
    /// assert!(policy.id.is_empty());
    /// ```
    pub fn new(name: impl Into<String>, rules: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: rules.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Restricts the policy to a datacenter. May be called repeatedly.
    #[must_use]
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenters.push(datacenter.into());
        self
    }
}

/// A policy as returned by the list endpoint, without its rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PolicyListEntry {
    /// Server-assigned ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Unique name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Datacenters the policy is valid in.
    #[serde(deserialize_with = "wire::null_as_default")]
    pub datacenters: Vec<String>,
    /// Content hash computed by the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<ContentHash>,
    /// Index at which the policy was created.
    pub create_index: u64,
    /// Index at which the policy was last modified.
    pub modify_index: u64,
}
