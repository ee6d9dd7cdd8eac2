//! ACL roles.

use serde::{Deserialize, Serialize};

use super::wire;
use super::{ContentHash, PolicyLink, ServiceIdentity};

/// An ACL role: a named bundle of policies and service identities that
/// tokens can link to.
///
/// `id` is assigned by the agent. Roles can be looked up by ID or name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Role {
    /// Server-assigned ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Unique name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Linked policies.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "wire::null_as_default"
    )]
    pub policies: Vec<PolicyLink>,
    /// Granted service identities.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "wire::null_as_default"
    )]
    pub service_identities: Vec<ServiceIdentity>,
    /// Content hash computed by the agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<ContentHash>,
    /// Index at which the role was created.
    pub create_index: u64,
    /// Index at which the role was last modified.
    pub modify_index: u64,
}

impl Role {
    /// Creates a role with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
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

    /// Grants a service identity.
    #[must_use]
    pub fn with_service_identity(mut self, identity: ServiceIdentity) -> Self {
        self.service_identities.push(identity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_roundtrips_through_builder() {
        let role = Role::new("ops")
            .with_description("operators")
            .with_policy(PolicyLink::by_name("node-read"))
            .with_service_identity(ServiceIdentity::new("web"));

        let value = serde_json::to_value(&role).unwrap();
        assert_eq!(value["Name"], "ops");
        assert_eq!(value["Policies"][0]["Name"], "node-read");
        assert_eq!(value["ServiceIdentities"][0]["ServiceName"], "web");
        assert!(value.get("Hash").is_none());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let role: Role = serde_json::from_value(json!({
            "ID": "aa770e5b-8b0b-7fcf-e5a1-8535fcc388b4",
            "Name": "example-role",
            "Policies": null,
            "Namespace": "default",
            "CreateIndex": 57,
            "ModifyIndex": 57
        }))
        .unwrap();
        assert_eq!(role.name, "example-role");
        assert!(role.policies.is_empty());
        assert_eq!(role.modify_index, 57);
    }
}
