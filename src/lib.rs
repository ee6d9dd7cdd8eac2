//! # Consul ACL client
//!
//! Typed client for the Consul ACL HTTP API: tokens, policies, roles,
//! identity providers, role binding rules, bootstrap and login.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use consul_acl::prelude::*;
//! use consul_acl::types::{Policy, PolicyLink, Token};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Address and token from CONSUL_HTTP_ADDR / CONSUL_HTTP_TOKEN
//!     let client = Client::from_env()?;
//!     let acl = client.acl();
//!
//!     // Create a policy and a token linked to it
//!     let policy = Policy::new("web-read", r#"service "web" { policy = "read" }"#);
//!     let (policy, _) = acl.policies().create(&policy, None).await?;
//!
//!     let token = Token::new()
//!         .with_description("web reader")
//!         .with_policy(PolicyLink::by_id(&policy.id));
//!     let (token, _) = acl.tokens().create(&token, None).await?;
//!     println!("created {}", token.accessor_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Client Hierarchy**: `Client` → `AclClient` → `TokensClient`, `PoliciesClient`, ...
//! - **Keys**: tokens, policies, roles and binding rules get their IDs from the
//!   agent; identity providers are keyed by a caller-chosen name. Violating
//!   either contract fails locally with [`ErrorKind::Precondition`]
//! - **Absence ≠ Error**: role, identity provider and binding rule reads
//!   return `Ok(None)` on 404
//! - **Metadata**: every call returns a [`QueryMeta`] or [`WriteMeta`] next
//!   to its result
//!
//! ## Features
//!
//! - `rest` (default): REST transport via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod types;

// ACL endpoints
pub mod acl;

// Transport layer
pub mod transport;

pub mod user_agent;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use acl::AclClient;
pub use client::{Client, ClientBuilder};
pub use config::{Config, RetryConfig, TlsConfig};
pub use error::{Error, ErrorKind, Result};
pub use protocol::{Consistency, QueryMeta, QueryOptions, WriteMeta, WriteOptions};
