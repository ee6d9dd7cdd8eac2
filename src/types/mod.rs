//! Entity model for the ACL API.
//!
//! Plain data records, serialized with the agent's field names:
//!
//! - [`Token`] / [`TokenListEntry`]: bearer tokens, keyed by accessor ID
//! - [`Policy`] / [`PolicyListEntry`]: named rule sets
//! - [`Role`]: bundles of policies and service identities
//! - [`IdentityProvider`] / [`IdentityProviderListEntry`]: external identity
//!   sources, keyed by a caller-chosen name
//! - [`RoleBindingRule`]: maps verified logins to roles
//! - [`PolicyLink`], [`RoleLink`], [`ServiceIdentity`]: embedded references
//!
//! List endpoints return the `*ListEntry` projections, which omit secrets
//! and large fields.

mod binding_rule;
mod hash;
mod identity_provider;
mod legacy;
mod links;
mod login;
mod policy;
mod replication;
mod role;
mod token;
pub(crate) mod wire;

pub use binding_rule::{RoleBindingRule, RoleBindingRuleMatch};
pub use hash::ContentHash;
pub use identity_provider::{IdentityProvider, IdentityProviderListEntry, IdentityProviderType};
pub use legacy::{AclEntry, LegacyTokenType};
pub use links::{PolicyLink, RoleLink, ServiceIdentity};
pub use login::LoginParams;
pub use policy::{Policy, PolicyListEntry};
pub use replication::ReplicationStatus;
pub use role::Role;
pub use token::{Token, TokenListEntry};
