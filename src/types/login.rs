//! Login parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::IdentityProviderType;

/// Credentials exchanged for a token by [`AclClient::login`].
///
/// The `Debug` output never includes the bearer credential.
///
/// [`AclClient::login`]: crate::acl::AclClient::login
///
/// ## Example
///
/// ```rust
/// use consul_acl::types::LoginParams;
///
/// let params = LoginParams::kubernetes("k8s", "eyJhbGciOi...")
///     .with_meta("pod", "web-5d9c");
/// assert!(!format!("{:?}", params).contains("eyJhbGciOi"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginParams {
    /// Type of the identity provider.
    #[serde(rename = "IDPType")]
    pub idp_type: IdentityProviderType,
    /// Name of the identity provider.
    #[serde(rename = "IDPName")]
    pub idp_name: String,
    /// The external bearer credential.
    #[serde(rename = "IDPToken")]
    pub idp_token: String,
    /// Metadata attached to the minted token's description.
    #[serde(rename = "Meta", skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl LoginParams {
    /// Creates login parameters for a Kubernetes identity provider.
    pub fn kubernetes(idp_name: impl Into<String>, service_account_jwt: impl Into<String>) -> Self {
        Self {
            idp_type: IdentityProviderType::Kubernetes,
            idp_name: idp_name.into(),
            idp_token: service_account_jwt.into(),
            meta: BTreeMap::new(),
        }
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

impl fmt::Debug for LoginParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginParams")
            .field("idp_type", &self.idp_type)
            .field("idp_name", &self.idp_name)
            .field("idp_token", &"<redacted>")
            .field("meta", &self.meta)
            .finish()
    }
}
