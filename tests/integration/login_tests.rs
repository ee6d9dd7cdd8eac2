//! Login and logout against a live agent.

use anyhow::Result;
use consul_acl::types::{IdentityProvider, LoginParams, RoleBindingRule, RoleBindingRuleMatch};
use consul_acl::{QueryOptions, WriteOptions};

use crate::common::{KubernetesEnv, unique_name, validate_environment};

#[tokio::test]
async fn test_login_then_logout_invalidates_token() -> Result<()> {
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
    let (rule, _) = acl.binding_rules().create(&rule, None).await?;

    let (token, _) = acl
        .login(&LoginParams::kubernetes(&idp_name, k8s.login_jwt), None)
        .await?;
    assert!(!token.accessor_id.is_empty());
    assert!(!token.secret_id.is_empty());

    let as_login = QueryOptions::new().with_token(&token.secret_id);
    let (me, _) = acl.tokens().read_self(Some(&as_login)).await?;
    assert_eq!(me.accessor_id, token.accessor_id);

    acl.logout(Some(&WriteOptions::new().with_token(&token.secret_id)))
        .await?;
    assert!(acl.tokens().read_self(Some(&as_login)).await.is_err());

    acl.binding_rules().delete(&rule.id, None).await?;
    acl.identity_providers().delete(&idp_name, None).await?;
    Ok(())
}
