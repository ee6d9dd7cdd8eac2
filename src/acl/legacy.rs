//! Legacy single-type tokens.
//!
//! Kept for clusters that still carry pre-1.4 tokens. New code should use
//! [`TokensClient`](super::TokensClient).

use serde::Deserialize;

use super::resource::require_key;
use crate::Error;
use crate::client::Client;
use crate::protocol::{QueryMeta, QueryOptions, Request, WriteMeta, WriteOptions};
use crate::types::AclEntry;

const KIND: &str = "legacy token";

#[derive(Deserialize)]
struct IdResponse {
    #[serde(rename = "ID")]
    id: String,
}

/// Client for legacy token operations.
///
/// Access via `client.acl().legacy()`.
#[derive(Clone)]
pub struct LegacyClient {
    client: Client,
}

impl LegacyClient {
    /// Creates a new legacy client.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a legacy token and returns its ID.
    pub async fn create(
        &self,
        entry: &AclEntry,
        options: Option<&WriteOptions>,
    ) -> Result<(String, WriteMeta), Error> {
        let request = Request::put("/v1/acl/create")
            .maybe_write_options(options)
            .json(entry)?;
        let (created, meta): (IdResponse, _) = self.client.inner().write(request).await?;
        Ok((created.id, meta))
    }

    /// Replaces a legacy token. `id` must be set.
    pub async fn update(
        &self,
        entry: &AclEntry,
        options: Option<&WriteOptions>,
    ) -> Result<WriteMeta, Error> {
        require_key(KIND, "ID", &entry.id, "update")?;
        let request = Request::put("/v1/acl/update")
            .maybe_write_options(options)
            .json(entry)?;
        self.client.inner().write_discard(request).await
    }

    /// Destroys a legacy token.
    pub async fn destroy(&self, id: &str, options: Option<&WriteOptions>) -> Result<WriteMeta, Error> {
        require_key(KIND, "ID", id, "deletion")?;
        let request = Request::put(format!("/v1/acl/destroy/{}", id)).maybe_write_options(options);
        self.client.inner().write_discard(request).await
    }

    /// Copies a legacy token and returns the new ID.
    pub async fn clone_token(
        &self,
        id: &str,
        options: Option<&WriteOptions>,
    ) -> Result<(String, WriteMeta), Error> {
        require_key(KIND, "ID", id, "cloning")?;
        let request = Request::put(format!("/v1/acl/clone/{}", id)).maybe_write_options(options);
        let (created, meta): (IdResponse, _) = self.client.inner().write(request).await?;
        Ok((created.id, meta))
    }

    /// Reads a legacy token. `None` if the agent returns no entry.
    pub async fn info(
        &self,
        id: &str,
        options: Option<&QueryOptions>,
    ) -> Result<(Option<AclEntry>, QueryMeta), Error> {
        require_key(KIND, "ID", id, "read")?;
        let request = Request::get(format!("/v1/acl/info/{}", id)).maybe_query_options(options);
        self.client.inner().query_first(request).await
    }

    /// Lists legacy tokens.
    pub async fn list(
        &self,
        options: Option<&QueryOptions>,
    ) -> Result<(Vec<AclEntry>, QueryMeta), Error> {
        let request = Request::get("/v1/acl/list").maybe_query_options(options);
        self.client.inner().query_list(request).await
    }
}

impl std::fmt::Debug for LegacyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegacyClient").finish_non_exhaustive()
    }
}
