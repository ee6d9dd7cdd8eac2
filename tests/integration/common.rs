//! Common test harness for the integration tests.

use anyhow::{Context, Result};
use consul_acl::{Client, Config};

/// Management token used when `CONSUL_HTTP_TOKEN` is unset.
pub const DEFAULT_MANAGEMENT_TOKEN: &str = "root";

/// Routes the client's request logs to the test output. Controlled by
/// `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a client from the environment, defaulting to the dev agent's
/// management token.
pub fn client() -> Result<Client> {
    init_tracing();
    let mut config = Config::from_env().context("invalid CONSUL_* environment")?;
    if config.token.is_none() {
        config.token = Some(DEFAULT_MANAGEMENT_TOKEN.to_owned());
    }
    Client::from_config(config).context("failed to build client")
}

/// Validates that the agent is reachable and the token is a valid one.
pub async fn validate_environment() -> Result<Client> {
    let client = client()?;
    client
        .acl()
        .tokens()
        .read_self(None)
        .await
        .with_context(|| {
            format!(
                "failed to read own token from {}. Is an ACL-enabled agent running?",
                client.address()
            )
        })?;
    Ok(client)
}

/// Returns `prefix` with a random suffix, so reruns do not collide.
pub fn unique_name(prefix: &str) -> String {
    format!("{}-{:08x}", prefix, fastrand::u32(..))
}

/// Kubernetes settings for the identity provider scenarios.
pub struct KubernetesEnv {
    pub host: String,
    pub ca_cert: String,
    pub reviewer_jwt: String,
    pub login_jwt: String,
}

impl KubernetesEnv {
    /// Reads the `K8S_*` variables. `None` when any is missing, in which
    /// case the scenario is skipped.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("K8S_HOST").ok()?;
        let ca_file = std::env::var("K8S_CA_CERT_FILE").ok()?;
        let reviewer_jwt = std::env::var("K8S_REVIEWER_JWT").ok()?;
        let login_jwt = std::env::var("K8S_LOGIN_JWT").ok()?;
        let ca_cert = std::fs::read_to_string(ca_file).ok()?;
        Some(Self {
            host,
            ca_cert,
            reviewer_jwt,
            login_jwt,
        })
    }
}
