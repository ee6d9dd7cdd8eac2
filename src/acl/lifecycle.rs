//! Create/read/update/delete shared by every ACL resource.

use super::resource::{AclResource, require_key};
use crate::Error;
use crate::client::Client;
use crate::protocol::{QueryMeta, QueryOptions, Request, WriteMeta, WriteOptions};

/// Creates `resource`. Fails before sending if its key violates the
/// resource's key-assignment contract.
pub(crate) async fn create<R: AclResource>(
    client: &Client,
    resource: &R,
    options: Option<&WriteOptions>,
) -> Result<(R, WriteMeta), Error> {
    resource.check_create()?;
    let request = Request::put(R::PATH)
        .maybe_write_options(options)
        .json(resource)?;
    client.inner().write(request).await
}

/// Replaces `resource`. Fails before sending if its key is empty.
pub(crate) async fn update<R: AclResource>(
    client: &Client,
    resource: &R,
    options: Option<&WriteOptions>,
) -> Result<(R, WriteMeta), Error> {
    resource.check_update()?;
    let request = Request::put(R::item_path(resource.key())?)
        .maybe_write_options(options)
        .json(resource)?;
    client.inner().write(request).await
}

/// Deletes the resource with `key`.
pub(crate) async fn delete<R: AclResource>(
    client: &Client,
    key: &str,
    options: Option<&WriteOptions>,
) -> Result<WriteMeta, Error> {
    require_key(R::KIND, R::KEY_FIELD, key, "deletion")?;
    let request = Request::delete(R::item_path(key)?).maybe_write_options(options);
    client.inner().write_discard(request).await
}

/// Reads the resource with `key`. A 404 is an error.
pub(crate) async fn read<R: AclResource>(
    client: &Client,
    key: &str,
    options: Option<&QueryOptions>,
) -> Result<(R, QueryMeta), Error> {
    require_key(R::KIND, R::KEY_FIELD, key, "read")?;
    let request = Request::get(R::item_path(key)?).maybe_query_options(options);
    client.inner().query(request).await
}

/// Reads the resource with `key`. A 404 is `None`.
pub(crate) async fn read_optional<R: AclResource>(
    client: &Client,
    key: &str,
    options: Option<&QueryOptions>,
) -> Result<(Option<R>, QueryMeta), Error> {
    require_key(R::KIND, R::KEY_FIELD, key, "read")?;
    let request = Request::get(R::item_path(key)?).maybe_query_options(options);
    client.inner().query_optional(request).await
}
