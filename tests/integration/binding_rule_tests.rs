//! Role binding rule lifecycle against a live agent.

use anyhow::{Context, Result};
use consul_acl::types::{IdentityProvider, RoleBindingRule, RoleBindingRuleMatch};

use crate::common::{KubernetesEnv, unique_name, validate_environment};

#[tokio::test]
async fn test_binding_rule_lifecycle() -> Result<()> {
    let Some(k8s) = KubernetesEnv::from_env() else {
        eprintln!("skipping: K8S_* variables not set");
        return Ok(());
    };
    let client = validate_environment().await?;
    let acl = client.acl();

    let idp_name = unique_name("k8s");
    let idp = IdentityProvider::kubernetes(&idp_name, k8s.host, k8s.ca_cert, k8s.reviewer_jwt);
    acl.identity_providers().create(&idp, None).await?;

    let rule = RoleBindingRule::new(&idp_name, "k8s-${serviceaccount.name}")
        .with_match(RoleBindingRuleMatch::new(["serviceaccount.namespace=default"]));
    let (created, _) = acl.binding_rules().create(&rule, None).await?;
    assert!(!created.id.is_empty());

    let (read, _) = acl.binding_rules().read(&created.id, None).await?;
    assert_eq!(read.context("rule missing")?.idp_name, idp_name);

    let (listed, _) = acl
        .binding_rules()
        .list()
        .identity_provider(&idp_name)
        .await?;
    assert_eq!(listed.len(), 1);

    acl.binding_rules().delete(&created.id, None).await?;
    let (gone, _) = acl.binding_rules().read(&created.id, None).await?;
    assert!(gone.is_none());

    acl.identity_providers().delete(&idp_name, None).await?;
    Ok(())
}
