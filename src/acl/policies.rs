//! Policy management.

use super::lifecycle;
use crate::Error;
use crate::client::Client;
use crate::protocol::{QueryMeta, QueryOptions, Request, WriteMeta, WriteOptions};
use crate::types::{Policy, PolicyListEntry};

/// Client for policy operations.
///
/// Access via `client.acl().policies()`.
///
/// ## Example
///
/// ```rust,no_run
/// # async fn example(client: consul_acl::Client) -> Result<(), consul_acl::Error> {
/// use consul_acl::types::Policy;
///
/// let policy = Policy::new("web-read", r#"service "web" { policy = "read" }"#)
///     .with_datacenter("dc1");
/// let (created, _) = client.acl().policies().create(&policy, None).await?;
/// println!("{} -> {}", created.name, created.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PoliciesClient {
    client: Client,
}

impl PoliciesClient {
    /// Creates a new policies client.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a policy. `id` must be empty.
    pub async fn create(
        &self,
        policy: &Policy,
        options: Option<&WriteOptions>,
    ) -> Result<(Policy, WriteMeta), Error> {
        lifecycle::create(&self.client, policy, options).await
    }

    /// Replaces a policy. `id` must be set.
    pub async fn update(
        &self,
        policy: &Policy,
        options: Option<&WriteOptions>,
    ) -> Result<(Policy, WriteMeta), Error> {
        lifecycle::update(&self.client, policy, options).await
    }

    /// Deletes a policy.
    pub async fn delete(&self, id: &str, options: Option<&WriteOptions>) -> Result<WriteMeta, Error> {
        lifecycle::delete::<Policy>(&self.client, id, options).await
    }

    /// Reads a policy. An unknown ID is an error.
    pub async fn read(
        &self,
        id: &str,
        options: Option<&QueryOptions>,
    ) -> Result<(Policy, QueryMeta), Error> {
        lifecycle::read(&self.client, id, options).await
    }

    /// Lists policies. Entries omit the rule text.
    pub async fn list(
        &self,
        options: Option<&QueryOptions>,
    ) -> Result<(Vec<PolicyListEntry>, QueryMeta), Error> {
        let request = Request::get("/v1/acl/policies").maybe_query_options(options);
        self.client.inner().query_list(request).await
    }
}

impl std::fmt::Debug for PoliciesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoliciesClient").finish_non_exhaustive()
    }
}
