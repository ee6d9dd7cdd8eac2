//! Identity provider management.

use super::lifecycle;
use crate::Error;
use crate::client::Client;
use crate::protocol::{QueryMeta, QueryOptions, Request, WriteMeta, WriteOptions};
use crate::types::{IdentityProvider, IdentityProviderListEntry};

/// Client for identity provider operations.
///
/// Access via `client.acl().identity_providers()`. Providers are keyed by
/// their caller-chosen name, so every operation requires one.
///
/// ## Example
///
/// ```rust,no_run
/// # async fn example(client: consul_acl::Client) -> Result<(), consul_acl::Error> {
/// use consul_acl::types::IdentityProvider;
///
/// let idp = IdentityProvider::kubernetes(
///     "minikube",
///     "https://192.0.2.42:8443",
///     "-----BEGIN CERTIFICATE-----\n...",
///     "eyJhbGciOiJSUzI1NiIsImtpZCI6IiJ9...",
/// );
/// let (created, _) = client.acl().identity_providers().create(&idp, None).await?;
/// assert_eq!(created.name, "minikube");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct IdentityProvidersClient {
    client: Client,
}

impl IdentityProvidersClient {
    /// Creates a new identity providers client.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a provider. `name` must be set.
    pub async fn create(
        &self,
        idp: &IdentityProvider,
        options: Option<&WriteOptions>,
    ) -> Result<(IdentityProvider, WriteMeta), Error> {
        lifecycle::create(&self.client, idp, options).await
    }

    /// Replaces a provider. `name` must be set.
    pub async fn update(
        &self,
        idp: &IdentityProvider,
        options: Option<&WriteOptions>,
    ) -> Result<(IdentityProvider, WriteMeta), Error> {
        lifecycle::update(&self.client, idp, options).await
    }

    /// Deletes a provider.
    pub async fn delete(
        &self,
        name: &str,
        options: Option<&WriteOptions>,
    ) -> Result<WriteMeta, Error> {
        lifecycle::delete::<IdentityProvider>(&self.client, name, options).await
    }

    /// Reads a provider. `None` if it does not exist.
    pub async fn read(
        &self,
        name: &str,
        options: Option<&QueryOptions>,
    ) -> Result<(Option<IdentityProvider>, QueryMeta), Error> {
        lifecycle::read_optional(&self.client, name, options).await
    }

    /// Lists providers. Entries omit the CA certificate and service-account
    /// JWT.
    pub async fn list(
        &self,
        options: Option<&QueryOptions>,
    ) -> Result<(Vec<IdentityProviderListEntry>, QueryMeta), Error> {
        let request = Request::get("/v1/acl/idps").maybe_query_options(options);
        self.client.inner().query_list(request).await
    }
}

impl std::fmt::Debug for IdentityProvidersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityProvidersClient")
            .finish_non_exhaustive()
    }
}
