//! Link records embedded in tokens and roles.

use serde::{Deserialize, Serialize};

use super::wire;

/// A reference to a policy by ID and name.
///
/// Either field is enough when submitting; the agent resolves the other.
/// In responses the ID is authoritative and the name is a cache hint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PolicyLink {
    /// Policy ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Policy name.
    pub name: String,
}

impl PolicyLink {
    /// Links a policy by ID.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Links a policy by name.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
        }
    }
}

/// A reference to a role by ID and name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RoleLink {
    /// Role ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Role name.
    pub name: String,
    /// Name the role was bound under by a binding rule, if any.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bound_name: String,
}

impl RoleLink {
    /// Links a role by ID.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Links a role by name.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Grants the standard permissions of a named service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceIdentity {
    /// The service name.
    pub service_name: String,
    /// Datacenters the grant applies to. Empty means all.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "wire::null_as_default"
    )]
    pub datacenters: Vec<String>,
}

impl ServiceIdentity {
    /// Creates a grant for `service_name` valid in every datacenter.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            datacenters: Vec::new(),
        }
    }

    /// Restricts the grant to a datacenter. May be called repeatedly.
    #[must_use]
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenters.push(datacenter.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_policy_link_wire_names() {
        let link = PolicyLink::by_name("read-only");
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({"ID": "", "Name": "read-only"})
        );
    }

    #[test]
    fn test_role_link_omits_empty_bound_name() {
        let link = RoleLink::by_id("abc");
        let value = serde_json::to_value(&link).unwrap();
        assert!(value.get("BoundName").is_none());

        let decoded: RoleLink =
            serde_json::from_value(json!({"ID": "abc", "Name": "ops", "BoundName": "ops-k8s"}))
                .unwrap();
        assert_eq!(decoded.bound_name, "ops-k8s");
    }

    #[test]
    fn test_service_identity() {
        let identity = ServiceIdentity::new("web").with_datacenter("dc1");
        assert_eq!(
            serde_json::to_value(&identity).unwrap(),
            json!({"ServiceName": "web", "Datacenters": ["dc1"]})
        );

        let decoded: ServiceIdentity =
            serde_json::from_value(json!({"ServiceName": "db", "Datacenters": null})).unwrap();
        assert!(decoded.datacenters.is_empty());
        assert!(
            serde_json::to_value(&decoded)
                .unwrap()
                .get("Datacenters")
                .is_none()
        );
    }
}
