//! Client types for talking to a Consul agent.
//!
//! The SDK uses a hierarchical client structure:
//! - [`Client`]: Top-level client, owns configuration and the transport
//! - [`AclClient`]: ACL endpoints, reached through [`Client::acl`]
//! - Per-resource clients (`tokens()`, `policies()`, ...) hanging off
//!   [`AclClient`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), consul_acl::Error> {
//! use consul_acl::prelude::*;
//!
//! let client = Client::builder()
//!     .address("http://127.0.0.1:8500")
//!     .token("b1gs33cr3t")
//!     .build()?;
//!
//! let (me, _) = client.acl().tokens().read_self(None).await?;
//! println!("{}", me.accessor_id);
//! # Ok(())
//! # }
//! ```

mod builder;
mod inner;

pub use builder::{ClientBuilder, HasAddress, NoAddress};

use std::sync::Arc;

use crate::acl::AclClient;
use crate::config::Config;
#[cfg(feature = "rest")]
use crate::{Error, transport::RestTransport};

/// The Consul ACL client.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share one transport and
/// therefore one connection pool. Configuration is fixed once built; every
/// call builds and owns its own request.
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder<NoAddress> {
        ClientBuilder::new()
    }

    /// Creates a REST client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the address is invalid or a TLS
    /// file cannot be loaded.
    #[cfg(feature = "rest")]
    pub fn from_config(config: Config) -> Result<Self, Error> {
        let transport = RestTransport::from_config(&config)?;
        Ok(Self::from_inner(inner::ClientInner::new(
            config,
            Arc::new(transport),
        )))
    }

    /// Creates a REST client from the `CONSUL_*` environment variables.
    ///
    /// See [`Config::from_env`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the environment describes an
    /// unusable client.
    #[cfg(feature = "rest")]
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(Config::from_env()?)
    }

    /// Returns the ACL endpoints.
    pub fn acl(&self) -> AclClient {
        AclClient::new(self.clone())
    }

    /// Returns the configured agent address.
    pub fn address(&self) -> &str {
        &self.inner.config.address
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Creates a client from the inner implementation.
    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns a reference to the inner client.
    pub(crate) fn inner(&self) -> &inner::ClientInner {
        &self.inner
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("address", &self.inner.config.address)
            .field("datacenter", &self.inner.config.datacenter)
            .finish_non_exhaustive()
    }
}
