//! Key-assignment contracts shared by the ACL resources.
//!
//! Every resource is created and updated through the same lifecycle. What
//! differs is who chooses its key:
//!
//! ```text
//! ServerAssignedKey  create: key must be empty   update: key must be set
//! CallerAssignedKey  create: key must be set     update: key must be set
//! ```

use std::borrow::Cow;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Error;
use crate::protocol::{check_segment, escape_segment};
use crate::types::{IdentityProvider, Policy, Role, RoleBindingRule, Token};

/// Who assigns a resource's key, and how the key appears in paths.
pub(crate) trait KeyPolicy {
    /// Validates the key of a resource about to be created.
    fn check_create(kind: &str, field: &str, key: &str) -> Result<(), Error>;

    /// Renders the key as a path segment.
    fn segment(key: &str) -> Result<Cow<'_, str>, Error>;
}

/// The agent generates the key. Keys come back from earlier responses and
/// are used in paths as-is, except `.` and `..`, which are rejected.
pub(crate) enum ServerAssignedKey {}

/// The caller chooses the key. Keys are percent-encoded into paths.
pub(crate) enum CallerAssignedKey {}

impl KeyPolicy for ServerAssignedKey {
    fn check_create(kind: &str, field: &str, key: &str) -> Result<(), Error> {
        if key.is_empty() {
            Ok(())
        } else {
            Err(Error::precondition(format!(
                "cannot specify {} in {} creation",
                field, kind
            )))
        }
    }

    fn segment(key: &str) -> Result<Cow<'_, str>, Error> {
        check_segment(key).map(Cow::Borrowed)
    }
}

impl KeyPolicy for CallerAssignedKey {
    fn check_create(kind: &str, field: &str, key: &str) -> Result<(), Error> {
        require_key(kind, field, key, "creation")
    }

    fn segment(key: &str) -> Result<Cow<'_, str>, Error> {
        escape_segment(key)
    }
}

/// Fails unless `key` is non-empty. `action` completes the message, e.g.
/// "must specify AccessorID for token update".
pub(crate) fn require_key(kind: &str, field: &str, key: &str, action: &str) -> Result<(), Error> {
    if key.is_empty() {
        Err(Error::precondition(format!(
            "must specify {} for {} {}",
            field, kind, action
        )))
    } else {
        Ok(())
    }
}

/// An entity managed through the generic ACL lifecycle.
pub(crate) trait AclResource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human name used in error messages.
    const KIND: &'static str;
    /// Wire name of the key field.
    const KEY_FIELD: &'static str;
    /// Collection path; items live under `{PATH}/{key}`.
    const PATH: &'static str;

    /// Key-assignment contract.
    type Key: KeyPolicy;

    /// Returns the key.
    fn key(&self) -> &str;

    /// Checks the resource can be submitted for creation.
    fn check_create(&self) -> Result<(), Error> {
        Self::Key::check_create(Self::KIND, Self::KEY_FIELD, self.key())
    }

    /// Checks the resource can be submitted for update.
    fn check_update(&self) -> Result<(), Error> {
        require_key(Self::KIND, Self::KEY_FIELD, self.key(), "update")
    }

    /// Path of the item with `key`.
    fn item_path(key: &str) -> Result<String, Error> {
        Ok(format!("{}/{}", Self::PATH, Self::Key::segment(key)?))
    }
}

impl AclResource for Token {
    const KIND: &'static str = "token";
    const KEY_FIELD: &'static str = "AccessorID";
    const PATH: &'static str = "/v1/acl/token";
    type Key = ServerAssignedKey;

    fn key(&self) -> &str {
        &self.accessor_id
    }

    fn check_create(&self) -> Result<(), Error> {
        ServerAssignedKey::check_create(Self::KIND, Self::KEY_FIELD, &self.accessor_id)?;
        ServerAssignedKey::check_create(Self::KIND, "SecretID", &self.secret_id)
    }
}

impl AclResource for Policy {
    const KIND: &'static str = "policy";
    const KEY_FIELD: &'static str = "ID";
    const PATH: &'static str = "/v1/acl/policy";
    type Key = ServerAssignedKey;

    fn key(&self) -> &str {
        &self.id
    }
}

impl AclResource for Role {
    const KIND: &'static str = "role";
    const KEY_FIELD: &'static str = "ID";
    const PATH: &'static str = "/v1/acl/role";
    type Key = ServerAssignedKey;

    fn key(&self) -> &str {
        &self.id
    }
}

impl AclResource for IdentityProvider {
    const KIND: &'static str = "identity provider";
    const KEY_FIELD: &'static str = "Name";
    const PATH: &'static str = "/v1/acl/idp";
    type Key = CallerAssignedKey;

    fn key(&self) -> &str {
        &self.name
    }
}

impl AclResource for RoleBindingRule {
    const KIND: &'static str = "binding rule";
    const KEY_FIELD: &'static str = "ID";
    const PATH: &'static str = "/v1/acl/rolebindingrule";
    type Key = ServerAssignedKey;

    fn key(&self) -> &str {
        &self.id
    }
}
