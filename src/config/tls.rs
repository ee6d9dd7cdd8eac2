//! TLS settings for HTTPS agents.

use std::path::PathBuf;

/// TLS settings for talking to an agent over HTTPS.
///
/// By default the system roots are trusted and certificates are verified.
///
/// ## Example: Custom CA
///
/// ```rust
/// use consul_acl::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/etc/consul.d/consul-agent-ca.pem")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
///
/// ## Example: Client Certificate
///
/// With `verify_incoming` enabled on the agent, the client must present a
/// certificate:
///
/// ```rust
/// use consul_acl::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .client_cert_file("/etc/consul.d/dc1-client-consul-0.pem")
///     .client_key_file("/etc/consul.d/dc1-client-consul-0-key.pem")
///     .build();
/// assert!(config.has_client_identity());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct TlsConfig {
    /// CA certificate file (PEM).
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// CA certificate PEM data.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Client certificate file (PEM).
    #[builder(into)]
    pub client_cert_file: Option<PathBuf>,

    /// Client private key file (PEM).
    #[builder(into)]
    pub client_key_file: Option<PathBuf>,

    /// Skip certificate verification.
    ///
    /// **WARNING**: insecure. Only for local agents with self-signed
    /// certificates.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Creates a config that skips certificate verification.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if both a client certificate and key are configured.
    pub fn has_client_identity(&self) -> bool {
        self.client_cert_file.is_some() && self.client_key_file.is_some()
    }

    /// Returns `true` if a custom CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }
}
