//! Client builder with typestate pattern.

use std::{marker::PhantomData, sync::Arc, time::Duration};

use super::inner::ClientInner;
use crate::{
    Client, Error,
    config::{Config, RetryConfig, TlsConfig},
    transport::{PoolConfig, Transport},
};

/// Marker type: address not yet provided.
pub struct NoAddress;

/// Marker type: address has been provided.
pub struct HasAddress;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern so a client cannot be built before an agent
/// address is chosen. Use [`Client::from_env`] to pick the address up from
/// `CONSUL_HTTP_ADDR` instead.
///
/// ## Required Configuration
///
/// - `address()`: The agent HTTP endpoint
///
/// ## Optional Configuration
///
/// - `token()`: Default ACL token
/// - `datacenter()`: Default datacenter
/// - `timeout()`: Request timeout
/// - `tls_config()`: Custom TLS settings
/// - `retry_config()`: Reconnect behavior
/// - `pool_config()`: Connection pool settings
///
/// ## Example
///
/// ```rust,no_run
/// # async fn example() -> Result<(), consul_acl::Error> {
/// use std::time::Duration;
/// use consul_acl::Client;
///
/// let client = Client::builder()
///     .address("https://consul.internal:8501")
///     .token("b1gs33cr3t")
///     .datacenter("dc1")
///     .timeout(Duration::from_secs(600))
///     .build()?;
/// # let _ = client;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder<AddressState> {
    config: Config,
    _address_state: PhantomData<AddressState>,
}

impl ClientBuilder<NoAddress> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            _address_state: PhantomData,
        }
    }

    /// Sets the agent address.
    ///
    /// A bare `host:port` is treated as plain HTTP.
    pub fn address(self, address: impl Into<String>) -> ClientBuilder<HasAddress> {
        let mut config = self.config;
        config.address = address.into();
        ClientBuilder {
            config,
            _address_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoAddress> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ClientBuilder<A> {
    /// Sets the default ACL token.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Sets the default datacenter.
    #[must_use]
    pub fn datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.config.datacenter = Some(datacenter.into());
        self
    }

    /// Sets the request timeout.
    ///
    /// Raise it above the `wait` of any blocking query issued through the
    /// client.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.config.tls = config;
        self
    }

    /// Sets the retry configuration.
    #[must_use]
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.config.retry = config;
        self
    }

    /// Sets the connection pool configuration.
    #[must_use]
    pub fn pool_config(mut self, config: PoolConfig) -> Self {
        self.config.pool = config;
        self
    }
}

impl ClientBuilder<HasAddress> {
    /// Builds the client over the REST transport.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the address is invalid or a TLS
    /// file cannot be loaded.
    #[cfg(feature = "rest")]
    pub fn build(self) -> Result<Client, Error> {
        Client::from_config(self.config)
    }

    /// Builds the client over a caller-supplied transport.
    ///
    /// The address is still validated. TLS, retry and pool settings are
    /// left to the transport.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the address is invalid.
    pub fn build_with_transport(self, transport: Arc<dyn Transport>) -> Result<Client, Error> {
        self.config.base_url()?;
        Ok(Client::from_inner(ClientInner::new(self.config, transport)))
    }
}

impl<A> std::fmt::Debug for ClientBuilder<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .finish()
    }
}
