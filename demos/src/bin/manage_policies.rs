//! Policy, role and token lifecycle.
//!
//! Creates a policy, a role linking it and a token linking the role, lists
//! them back, then cleans up.
//!
//! # Running
//!
//! ```bash
//! export CONSUL_HTTP_ADDR="127.0.0.1:8500"
//! export CONSUL_HTTP_TOKEN="<management token>"
//! cargo run -p consul-acl-demos --bin manage_policies
//! ```

use std::time::Duration;

use consul_acl::prelude::*;
use consul_acl::types::{Policy, PolicyLink, Role, RoleLink, ServiceIdentity, Token};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let acl = Client::from_env()?.acl();

    // Policy
    let policy = Policy::new("demo-kv-read", r#"key_prefix "demo/" { policy = "read" }"#)
        .with_description("Read access to demo/");
    let (policy, _) = acl.policies().create(&policy, None).await?;
    println!("policy {} ({})", policy.name, policy.id);

    // Role
    let role = Role::new("demo-reader")
        .with_policy(PolicyLink::by_id(&policy.id))
        .with_service_identity(ServiceIdentity::new("demo-web"));
    let (role, _) = acl.roles().create(&role, None).await?;
    println!("role {} ({})", role.name, role.id);

    // Token, expiring in an hour
    let token = Token::new()
        .with_description("demo reader")
        .with_role(RoleLink::by_id(&role.id))
        .with_expiration_ttl(Duration::from_secs(3600));
    let (token, _) = acl.tokens().create(&token, None).await?;
    println!(
        "token {} expires {:?}",
        token.accessor_id, token.expiration_time
    );

    // Read-your-own-writes needs a consistent read
    let consistent = QueryOptions::new().with_consistency(Consistency::Consistent);
    let (linked, meta) = acl
        .tokens()
        .list()
        .role(&role.id)
        .options(consistent)
        .await?;
    println!("{} token(s) linked to the role at index {}", linked.len(), meta.last_index);

    // Cleanup
    acl.tokens().delete(&token.accessor_id, None).await?;
    acl.roles().delete(&role.id, None).await?;
    acl.policies().delete(&policy.id, None).await?;

    let (gone, _) = acl.roles().read(&role.id, None).await?;
    println!("role still present: {}", gone.is_some());

    Ok(())
}
