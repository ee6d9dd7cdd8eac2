//! Role management.

use super::lifecycle;
use super::resource::require_key;
use crate::Error;
use crate::client::Client;
use crate::protocol::{QueryMeta, QueryOptions, Request, WriteMeta, WriteOptions, escape_segment};
use crate::types::Role;

/// Client for role operations.
///
/// Access via `client.acl().roles()`. Reads return `None` for roles that
/// do not exist.
#[derive(Clone)]
pub struct RolesClient {
    client: Client,
}

impl RolesClient {
    /// Creates a new roles client.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a role. `id` must be empty.
    pub async fn create(
        &self,
        role: &Role,
        options: Option<&WriteOptions>,
    ) -> Result<(Role, WriteMeta), Error> {
        lifecycle::create(&self.client, role, options).await
    }

    /// Replaces a role. `id` must be set.
    pub async fn update(
        &self,
        role: &Role,
        options: Option<&WriteOptions>,
    ) -> Result<(Role, WriteMeta), Error> {
        lifecycle::update(&self.client, role, options).await
    }

    /// Deletes a role.
    pub async fn delete(&self, id: &str, options: Option<&WriteOptions>) -> Result<WriteMeta, Error> {
        lifecycle::delete::<Role>(&self.client, id, options).await
    }

    /// Reads a role by ID.
    pub async fn read(
        &self,
        id: &str,
        options: Option<&QueryOptions>,
    ) -> Result<(Option<Role>, QueryMeta), Error> {
        lifecycle::read_optional(&self.client, id, options).await
    }

    /// Reads a role by name.
    pub async fn read_by_name(
        &self,
        name: &str,
        options: Option<&QueryOptions>,
    ) -> Result<(Option<Role>, QueryMeta), Error> {
        require_key("role", "Name", name, "read")?;
        let request = Request::get(format!("/v1/acl/role/name/{}", escape_segment(name)?))
            .maybe_query_options(options);
        self.client.inner().query_optional(request).await
    }

    /// Lists roles.
    pub async fn list(
        &self,
        options: Option<&QueryOptions>,
    ) -> Result<(Vec<Role>, QueryMeta), Error> {
        let request = Request::get("/v1/acl/roles").maybe_query_options(options);
        self.client.inner().query_list(request).await
    }
}

impl std::fmt::Debug for RolesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RolesClient").finish_non_exhaustive()
    }
}
