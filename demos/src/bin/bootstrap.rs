//! Bootstraps the ACL system of a fresh cluster.
//!
//! Mints the initial management token and prints it. A cluster can only be
//! bootstrapped once; running this again reports the agent's refusal.
//!
//! # Running
//!
//! ```bash
//! export CONSUL_HTTP_ADDR="127.0.0.1:8500"
//! cargo run -p consul-acl-demos --bin bootstrap
//! ```

use consul_acl::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::from_env()?;

    match client.acl().bootstrap().await {
        Ok((token, meta)) => {
            println!("AccessorID: {}", token.accessor_id);
            println!("SecretID:   {}", token.secret_id);
            println!("took {:?}", meta.request_time);
        }
        Err(err) if err.kind() == ErrorKind::Forbidden => {
            println!("ACL system already bootstrapped: {}", err.message());
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
