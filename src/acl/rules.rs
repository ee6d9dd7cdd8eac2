//! Translation of legacy rule syntax.

use bytes::Bytes;

use super::resource::require_key;
use crate::Error;
use crate::client::Client;
use crate::protocol::Request;
use crate::transport::BodyStream;

const TRANSLATED: &str = "translated rule body";

/// Client for the rule translation endpoints.
///
/// Access via `client.acl().rules()`. Both endpoints take and return
/// free text rather than JSON.
#[derive(Clone)]
pub struct RulesClient {
    client: Client,
}

impl RulesClient {
    /// Creates a new rules client.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Translates legacy rules into the current syntax.
    ///
    /// ## Example
    ///
    /// ```rust,no_run
    /// # #![allow(deprecated)]
    /// # async fn example(client: consul_acl::Client) -> Result<(), consul_acl::Error> {
    /// let translated = client
    ///     .acl()
    ///     .rules()
    ///     .translate(r#"key "" { policy = "read" }"#)
    ///     .await?;
    /// assert!(translated.contains("key_prefix"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn translate(&self, rules: impl Into<Bytes>) -> Result<String, Error> {
        let request = Request::post("/v1/acl/rules/translate").raw(rules.into());
        let (text, _) = self.client.inner().query_text(request, TRANSLATED).await?;
        Ok(text)
    }

    /// Translates legacy rules read from a stream.
    ///
    /// The body is sent once and never retried.
    pub async fn translate_stream(&self, rules: BodyStream) -> Result<String, Error> {
        let request = Request::post("/v1/acl/rules/translate").stream(rules);
        let (text, _) = self.client.inner().query_text(request, TRANSLATED).await?;
        Ok(text)
    }

    /// Translates the rules of the legacy token with `accessor_id`.
    pub async fn translate_token(&self, accessor_id: &str) -> Result<String, Error> {
        require_key("token", "AccessorID", accessor_id, "rule translation")?;
        let request = Request::get(format!("/v1/acl/rules/translate/{}", accessor_id));
        let (text, _) = self.client.inner().query_text(request, TRANSLATED).await?;
        Ok(text)
    }
}

impl std::fmt::Debug for RulesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulesClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use futures::StreamExt;

    use super::*;
    use crate::ErrorKind;
    use crate::acl::test_support::mock_client;
    use crate::transport::{Method, MockResponse};

    const TRANSLATED_RULES: &str = "key_prefix \"\" {\n  policy = \"read\"\n}";

    #[tokio::test]
    async fn test_translate() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::text(200, TRANSLATED_RULES));

        let text = client
            .acl()
            .rules()
            .translate("key \"\" { policy = \"read\" }")
            .await
            .unwrap();
        assert_eq!(text, TRANSLATED_RULES);

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/v1/acl/rules/translate");
        assert_eq!(&request.body[..], b"key \"\" { policy = \"read\" }");
    }

    #[tokio::test]
    async fn test_translate_stream() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::text(200, TRANSLATED_RULES));

        let chunks: Vec<std::io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"key \"\" ")),
            Ok(Bytes::from_static(b"{ policy = \"read\" }")),
        ];
        let text = client
            .acl()
            .rules()
            .translate_stream(futures::stream::iter(chunks).boxed())
            .await
            .unwrap();
        assert_eq!(text, TRANSLATED_RULES);
        assert_eq!(
            &mock.last_request().unwrap().body[..],
            b"key \"\" { policy = \"read\" }"
        );
    }

    #[tokio::test]
    async fn test_translate_token() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::text(200, TRANSLATED_RULES));
        client.acl().rules().translate_token("a1").await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/v1/acl/rules/translate/a1");
    }

    #[tokio::test]
    async fn test_unreadable_body_is_wrapped() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::new(200).with_body(vec![0xff, 0xfe, 0xfd]));
        let err = client.acl().rules().translate_token("a1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert!(err.message().starts_with("failed to read translated rule body"));
    }

    #[tokio::test]
    async fn test_server_error() {
        let (client, mock) = mock_client();
        mock.push(MockResponse::text(400, "Failed to parse legacy rules"));
        let err = client.acl().rules().translate("garbage").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }
}
