//! Role binding rule management.

use super::lifecycle;
use crate::Error;
use crate::client::Client;
use crate::protocol::{QueryMeta, QueryOptions, Request, WriteMeta, WriteOptions};
use crate::types::RoleBindingRule;

/// Client for role binding rule operations.
///
/// Access via `client.acl().binding_rules()`. Reads return `None` for
/// rules that do not exist.
#[derive(Clone)]
pub struct BindingRulesClient {
    client: Client,
}

impl BindingRulesClient {
    /// Creates a new binding rules client.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a rule. `id` must be empty.
    pub async fn create(
        &self,
        rule: &RoleBindingRule,
        options: Option<&WriteOptions>,
    ) -> Result<(RoleBindingRule, WriteMeta), Error> {
        lifecycle::create(&self.client, rule, options).await
    }

    /// Replaces a rule. `id` must be set.
    pub async fn update(
        &self,
        rule: &RoleBindingRule,
        options: Option<&WriteOptions>,
    ) -> Result<(RoleBindingRule, WriteMeta), Error> {
        lifecycle::update(&self.client, rule, options).await
    }

    /// Deletes a rule.
    pub async fn delete(&self, id: &str, options: Option<&WriteOptions>) -> Result<WriteMeta, Error> {
        lifecycle::delete::<RoleBindingRule>(&self.client, id, options).await
    }

    /// Reads a rule.
    pub async fn read(
        &self,
        id: &str,
        options: Option<&QueryOptions>,
    ) -> Result<(Option<RoleBindingRule>, QueryMeta), Error> {
        lifecycle::read_optional(&self.client, id, options).await
    }

    /// Lists rules.
    pub fn list(&self) -> ListBindingRulesRequest {
        ListBindingRulesRequest {
            client: self.client.clone(),
            identity_provider: None,
            options: QueryOptions::default(),
        }
    }
}

impl std::fmt::Debug for BindingRulesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingRulesClient").finish_non_exhaustive()
    }
}

/// Request to list role binding rules.
pub struct ListBindingRulesRequest {
    client: Client,
    identity_provider: Option<String>,
    options: QueryOptions,
}

impl ListBindingRulesRequest {
    /// Only rules of the named identity provider.
    #[must_use]
    pub fn identity_provider(mut self, name: impl Into<String>) -> Self {
        self.identity_provider = Some(name.into());
        self
    }

    /// Sets the query options.
    #[must_use]
    pub fn options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    async fn execute(self) -> Result<(Vec<RoleBindingRule>, QueryMeta), Error> {
        let mut request = Request::get("/v1/acl/rolebindingrules").query_options(&self.options);
        if let Some(name) = self.identity_provider.filter(|name| !name.is_empty()) {
            request = request.param("idp", name);
        }
        self.client.inner().query_list(request).await
    }
}

impl std::future::IntoFuture for ListBindingRulesRequest {
    type Output = Result<(Vec<RoleBindingRule>, QueryMeta), Error>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::acl::test_support::mock_client;
    use crate::transport::{Method, MockResponse};
    use crate::types::RoleBindingRuleMatch;

    fn rule_json() -> serde_json::Value {
        json!({
            "ID": "000ed53c-e2d3-e7e6-31a5-c19bc406fc63",
            "Description": "Backend services",
            "IDPName": "minikube",
            "Match": [{"Selector": ["serviceaccount.namespace=default", "serviceaccount.name=web"]}],
            "RoleName": "k8s-${serviceaccount.name}",
            "MustExist": true,
            "CreateIndex": 17,
            "ModifyIndex": 17
        })
    }

    #[tokio::test]
    async fn test_create() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::json(200, &rule_json()));

        let rule = RoleBindingRule::new("minikube", "k8s-${serviceaccount.name}")
            .with_description("Backend services")
            .with_match(RoleBindingRuleMatch::new([
                "serviceaccount.namespace=default",
                "serviceaccount.name=web",
            ]));
        let (created, _) = client.acl().binding_rules().create(&rule, None).await.unwrap();
        assert_eq!(created.id, "000ed53c-e2d3-e7e6-31a5-c19bc406fc63");
        assert!(created.must_exist);
        assert_eq!(created.matches[0].selector.len(), 2);

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/v1/acl/rolebindingrule");
        let body = request.body_json().unwrap();
        assert_eq!(body["IDPName"], "minikube");
        assert!(body.get("MustExist").is_none());
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::text(404, ""));
        let (rule, _) = client.acl().binding_rules().read("gone", None).await.unwrap();
        assert!(rule.is_none());
        assert_eq!(
            mock.last_request().unwrap().path,
            "/v1/acl/rolebindingrule/gone"
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::text(200, "true"));
        client.acl().binding_rules().delete("b1", None).await.unwrap();
        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/v1/acl/rolebindingrule/b1");
    }

    #[tokio::test]
    async fn test_list_by_identity_provider() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::json(200, &json!([rule_json()])));

        let (rules, _) = client
            .acl()
            .binding_rules()
            .list()
            .identity_provider("minikube")
            .await
            .unwrap();
        assert_eq!(rules.len(), 1);

        let request = mock.last_request().unwrap();
        assert_eq!(request.path, "/v1/acl/rolebindingrules");
        assert_eq!(request.param("idp"), Some("minikube"));
    }

    #[tokio::test]
    async fn test_list_without_filter() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::json(200, &json!([])));
        let (rules, _) = client.acl().binding_rules().list().await.unwrap();
        assert!(rules.is_empty());
        assert!(mock.last_request().unwrap().param("idp").is_none());
    }

    proptest! {
        #[test]
        fn prop_create_with_id_is_rejected_locally(id in "[a-z0-9-]{1,36}") {
            let (client, mock) = mock_client();
            let rule = RoleBindingRule { id, ..RoleBindingRule::new("minikube", "web") };
            let result = futures::executor::block_on(client.acl().binding_rules().create(&rule, None));
            prop_assert!(result.unwrap_err().is_precondition());
            prop_assert_eq!(mock.request_count(), 0);
        }

        #[test]
        fn prop_update_without_id_is_rejected_locally(role in "[a-z]{0,12}") {
            let (client, mock) = mock_client();
            let rule = RoleBindingRule::new("minikube", role);
            let result = futures::executor::block_on(client.acl().binding_rules().update(&rule, None));
            prop_assert!(result.unwrap_err().is_precondition());
            prop_assert_eq!(mock.request_count(), 0);
        }
    }
}
