//! External identity providers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of external identity an identity provider verifies.
///
/// ```rust
/// use consul_acl::types::IdentityProviderType;
///
/// assert_eq!(IdentityProviderType::Kubernetes.as_str(), "kubernetes");
/// assert_eq!(
///     IdentityProviderType::from("oidc".to_string()),
///     IdentityProviderType::Other("oidc".into())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdentityProviderType {
    /// Kubernetes service-account tokens, verified with the TokenReview API.
    Kubernetes,
    /// A type this client does not model. Passed through unchanged.
    Other(String),
}

impl IdentityProviderType {
    /// Returns the wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            IdentityProviderType::Kubernetes => "kubernetes",
            IdentityProviderType::Other(other) => other,
        }
    }
}

/// The empty type, as decoded from a response without a `Type` field.
impl Default for IdentityProviderType {
    fn default() -> Self {
        IdentityProviderType::Other(String::new())
    }
}

impl From<String> for IdentityProviderType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "kubernetes" => IdentityProviderType::Kubernetes,
            _ => IdentityProviderType::Other(value),
        }
    }
}

impl From<IdentityProviderType> for String {
    fn from(value: IdentityProviderType) -> Self {
        match value {
            IdentityProviderType::Kubernetes => "kubernetes".to_owned(),
            IdentityProviderType::Other(other) => other,
        }
    }
}

impl fmt::Display for IdentityProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identity provider that can exchange external credentials for tokens.
///
/// Unlike the other ACL entities, the key is chosen by the caller: `name`
/// must always be set.
///
/// The `Debug` output never includes the service-account JWT.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IdentityProvider {
    /// Unique name, chosen by the caller.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Provider type.
    #[serde(rename = "Type")]
    pub kind: IdentityProviderType,
    /// Address of the Kubernetes API server.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_host: String,
    /// PEM-encoded CA certificate of the Kubernetes API server.
    #[serde(rename = "KubernetesCACert", skip_serializing_if = "String::is_empty")]
    pub kubernetes_ca_cert: String,
    /// JWT of a service account allowed to call the TokenReview API.
    #[serde(
        rename = "KubernetesServiceAccountJWT",
        skip_serializing_if = "String::is_empty"
    )]
    pub kubernetes_service_account_jwt: String,
    /// Index at which the provider was created.
    pub create_index: u64,
    /// Index at which the provider was last modified.
    pub modify_index: u64,
}

impl IdentityProvider {
    /// Creates a Kubernetes identity provider.
    ///
    /// ```rust
    /// use consul_acl::types::{IdentityProvider, IdentityProviderType};
    ///
    /// let idp = IdentityProvider::kubernetes(
    ///     "k8s",
    ///     "https://192.0.2.42:8443",
    ///     "-----BEGIN CERTIFICATE-----\n...",
    ///     "eyJhbGciOiJSUzI1NiIsImtpZCI6IiJ9...",
    /// );
    /// assert_eq!(idp.kind, IdentityProviderType::Kubernetes);
    /// assert!(!format!("{:?}", idp).contains("eyJhbGci"));
    /// ```
    pub fn kubernetes(
        name: impl Into<String>,
        host: impl Into<String>,
        ca_cert: impl Into<String>,
        service_account_jwt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: IdentityProviderType::Kubernetes,
            kubernetes_host: host.into(),
            kubernetes_ca_cert: ca_cert.into(),
            kubernetes_service_account_jwt: service_account_jwt.into(),
            ..Default::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl fmt::Debug for IdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let jwt = if self.kubernetes_service_account_jwt.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("IdentityProvider")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("kind", &self.kind)
            .field("kubernetes_host", &self.kubernetes_host)
            .field("kubernetes_service_account_jwt", &jwt)
            .field("create_index", &self.create_index)
            .field("modify_index", &self.modify_index)
            .finish_non_exhaustive()
    }
}

/// An identity provider as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IdentityProviderListEntry {
    /// Unique name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Provider type.
    #[serde(rename = "Type")]
    pub kind: IdentityProviderType,
    /// Address of the Kubernetes API server.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_host: String,
    /// Index at which the provider was created.
    pub create_index: u64,
    /// Index at which the provider was last modified.
    pub modify_index: u64,
}
