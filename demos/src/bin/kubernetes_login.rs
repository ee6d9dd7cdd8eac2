//! Logs in with a Kubernetes service-account JWT.
//!
//! Registers a Kubernetes identity provider and a binding rule, exchanges
//! the JWT for a token, reads it back, then logs out.
//!
//! # Running
//!
//! ```bash
//! export CONSUL_HTTP_ADDR="127.0.0.1:8500"
//! export CONSUL_HTTP_TOKEN="<management token>"
//! export K8S_HOST="https://192.0.2.42:8443"
//! export K8S_CA_CERT_FILE="/var/run/secrets/kubernetes.io/serviceaccount/ca.crt"
//! export K8S_REVIEWER_JWT="<token-review service account JWT>"
//! export K8S_LOGIN_JWT="<workload service account JWT>"
//! cargo run -p consul-acl-demos --bin kubernetes_login
//! ```

use std::env;

use anyhow::Context;
use consul_acl::prelude::*;
use consul_acl::types::{IdentityProvider, LoginParams, RoleBindingRule, RoleBindingRuleMatch};
use tracing_subscriber::EnvFilter;

const IDP_NAME: &str = "demo-k8s";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = env::var("K8S_HOST").context("K8S_HOST must be set")?;
    let ca_file = env::var("K8S_CA_CERT_FILE").context("K8S_CA_CERT_FILE must be set")?;
    let reviewer_jwt = env::var("K8S_REVIEWER_JWT").context("K8S_REVIEWER_JWT must be set")?;
    let login_jwt = env::var("K8S_LOGIN_JWT").context("K8S_LOGIN_JWT must be set")?;
    let ca_cert = std::fs::read_to_string(&ca_file)
        .with_context(|| format!("failed to read {}", ca_file))?;

    let acl = Client::from_env()?.acl();

    let idp = IdentityProvider::kubernetes(IDP_NAME, host, ca_cert, reviewer_jwt)
        .with_description("demo cluster");
    acl.identity_providers().create(&idp, None).await?;

    let rule = RoleBindingRule::new(IDP_NAME, "k8s-${serviceaccount.name}")
        .with_match(RoleBindingRuleMatch::new(["serviceaccount.namespace=default"]));
    let (rule, _) = acl.binding_rules().create(&rule, None).await?;

    let (token, _) = acl
        .login(&LoginParams::kubernetes(IDP_NAME, login_jwt), None)
        .await?;
    println!("logged in as {}", token.accessor_id);

    let as_login = QueryOptions::new().with_token(&token.secret_id);
    let (me, _) = acl.tokens().read_self(Some(&as_login)).await?;
    println!("roles: {:?}", me.roles.iter().map(|r| &r.name).collect::<Vec<_>>());

    acl.logout(Some(&WriteOptions::new().with_token(&token.secret_id)))
        .await?;

    acl.binding_rules().delete(&rule.id, None).await?;
    acl.identity_providers().delete(IDP_NAME, None).await?;

    Ok(())
}
