//! Prelude module for convenient imports.
//!
//! ```rust
//! use consul_acl::prelude::*;
//! ```
//!
//! This provides access to:
//! - Core client types
//! - Error types
//! - Per-call options and response metadata

pub use crate::{
    acl::{
        AclClient, BindingRulesClient, IdentityProvidersClient, PoliciesClient, RolesClient,
        TokensClient,
    },
    client::{Client, ClientBuilder},
    config::{Config, RetryConfig, TlsConfig},
    error::{Error, ErrorKind, Result},
    protocol::{Consistency, QueryMeta, QueryOptions, WriteMeta, WriteOptions},
};
