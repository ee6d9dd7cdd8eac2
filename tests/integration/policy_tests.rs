//! Policy lifecycle against a live agent.

use anyhow::Result;
use consul_acl::types::Policy;

use crate::common::{unique_name, validate_environment};

#[tokio::test]
async fn test_policy_lifecycle() -> Result<()> {
    let client = validate_environment().await?;
    let policies = client.acl().policies();

    let rules = r#"key_prefix "test/" { policy = "read" }"#;
    let (created, _) = policies
        .create(&Policy::new(unique_name("lifecycle"), rules), None)
        .await?;
    assert!(!created.id.is_empty());
    assert_eq!(created.rules, rules);

    let mut changed = created.clone();
    changed.description = "updated".into();
    let (updated, _) = policies.update(&changed, None).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description, "updated");
    assert!(updated.modify_index > created.modify_index);

    let (listed, _) = policies.list(None).await?;
    assert!(listed.iter().any(|entry| entry.id == created.id));

    policies.delete(&created.id, None).await?;
    assert!(policies.read(&created.id, None).await.is_err());
    Ok(())
}
