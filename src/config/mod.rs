//! Client configuration.
//!
//! - [`Config`]: agent address, default token and datacenter, timeouts
//! - [`TlsConfig`]: TLS settings for HTTPS agents
//! - [`RetryConfig`]: reconnect behavior for unreachable agents
//!
//! ## Environment
//!
//! [`Config::from_env`] reads the variables the `consul` CLI uses:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `CONSUL_HTTP_ADDR` | Agent address, `http://` assumed without a scheme |
//! | `CONSUL_HTTP_TOKEN` | Default ACL token |
//! | `CONSUL_HTTP_TOKEN_FILE` | File holding the default ACL token |
//! | `CONSUL_HTTP_SSL` | `true` switches a scheme-less address to `https://` |
//! | `CONSUL_HTTP_SSL_VERIFY` | `false` disables certificate verification |
//! | `CONSUL_CACERT` | CA certificate file |
//! | `CONSUL_CLIENT_CERT` / `CONSUL_CLIENT_KEY` | Client certificate and key |
//! | `CONSUL_DATACENTER` | Default datacenter |

mod retry;
mod tls;

use std::fmt;
use std::time::Duration;

pub use retry::RetryConfig;
pub use tls::TlsConfig;
use url::Url;

use crate::Error;
use crate::transport::PoolConfig;

/// Address used when none is configured.
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8500";

/// Default request timeout.
///
/// Blocking queries hold the request open for up to their `wait` time, so
/// raise this alongside long waits.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client configuration.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use consul_acl::Config;
///
/// let config = Config::builder()
///     .address("https://consul.service:8501")
///     .token("b1gs33cr3t")
///     .datacenter("dc2")
///     .timeout(Duration::from_secs(600))
///     .build();
///
/// assert_eq!(config.datacenter.as_deref(), Some("dc2"));
/// assert!(!format!("{:?}", config).contains("b1gs33cr3t"));
/// ```
#[derive(Clone, bon::Builder)]
pub struct Config {
    /// Agent address, e.g. `http://127.0.0.1:8500`.
    #[builder(into, default = DEFAULT_ADDRESS.to_owned())]
    pub address: String,

    /// ACL token sent with every request that does not override it.
    #[builder(into)]
    pub token: Option<String>,

    /// Datacenter targeted by every request that does not override it.
    #[builder(into)]
    pub datacenter: Option<String>,

    /// Total time allowed for one request, including the response body.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,

    /// TLS settings.
    #[builder(default)]
    pub tls: TlsConfig,

    /// Reconnect behavior.
    #[builder(default)]
    pub retry: RetryConfig,

    /// Connection pool settings.
    #[builder(default)]
    pub pool: PoolConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Config {
    /// Builds a configuration from the `CONSUL_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `CONSUL_HTTP_TOKEN_FILE` is set but
    /// cannot be read.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Config::default();

        let use_tls = match get("CONSUL_HTTP_SSL") {
            Some(value) => parse_bool("CONSUL_HTTP_SSL", &value).unwrap_or(false),
            None => false,
        };
        if let Some(address) = get("CONSUL_HTTP_ADDR") {
            config.address = normalize_address(&address, use_tls);
        } else if use_tls {
            config.address = normalize_address("127.0.0.1:8500", true);
        }

        if let Some(token) = get("CONSUL_HTTP_TOKEN") {
            config.token = Some(token);
        } else if let Some(path) = get("CONSUL_HTTP_TOKEN_FILE") {
            let token = std::fs::read_to_string(&path).map_err(|e| {
                Error::configuration(format!("failed to read token file {}: {}", path, e))
                    .with_source(e)
            })?;
            config.token = Some(token.trim().to_owned());
        }

        config.datacenter = get("CONSUL_DATACENTER");

        if let Some(value) = get("CONSUL_HTTP_SSL_VERIFY")
            && let Some(verify) = parse_bool("CONSUL_HTTP_SSL_VERIFY", &value)
        {
            config.tls.skip_verification = !verify;
        }
        if let Some(path) = get("CONSUL_CACERT") {
            config.tls.ca_cert_file = Some(path.into());
        }
        if let Some(path) = get("CONSUL_CLIENT_CERT") {
            config.tls.client_cert_file = Some(path.into());
        }
        if let Some(path) = get("CONSUL_CLIENT_KEY") {
            config.tls.client_key_file = Some(path.into());
        }

        Ok(config)
    }

    /// Parses the configured address into a base URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the address is empty or not a
    /// valid `http`/`https` URL.
    pub fn base_url(&self) -> Result<Url, Error> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(Error::configuration("address cannot be empty"));
        }
        let url = Url::parse(&normalize_address(address, false))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::configuration(format!(
                "unsupported address scheme: {}",
                other
            ))),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("address", &self.address)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("datacenter", &self.datacenter)
            .field("timeout", &self.timeout)
            .field("tls", &self.tls)
            .field("retry", &self.retry)
            .field("pool", &self.pool)
            .finish()
    }
}

/// Adds a scheme to a bare `host:port` address.
pub(crate) fn normalize_address(address: &str, use_tls: bool) -> String {
    if address.contains("://") {
        address.to_owned()
    } else if use_tls {
        format!("https://{}", address)
    } else {
        format!("http://{}", address)
    }
}

fn parse_bool(key: &str, value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => {
            tracing::warn!(variable = key, value, "ignoring unparseable boolean");
            None
        }
    }
}
