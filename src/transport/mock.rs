//! Mock transport implementation for testing.
//!
//! Responses are scripted up front and served in order. Every request is
//! recorded so tests can assert on what was sent, or that nothing was.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use parking_lot::RwLock;

use super::traits::{HttpRequest, HttpResponse, Method, RequestBody, Transport};
use crate::Error;

/// A scripted response.
///
/// ```rust
/// use consul_acl::transport::MockResponse;
///
/// let response = MockResponse::json(200, &serde_json::json!({"ID": "abc"}))
///     .with_header("X-Consul-Index", "42");
/// ```
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl MockResponse {
    /// A response with the given status and no body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// A response with a text body.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status).with_body(body.into())
    }

    /// A response with a JSON body.
    pub fn json<T: serde::Serialize + ?Sized>(status: u16, body: &T) -> Self {
        let body = serde_json::to_vec(body).unwrap_or_default();
        Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(body)
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A request as seen by [`MockTransport`], with any streamed body drained.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Query parameters.
    pub params: Vec<(String, String)>,
    /// Headers.
    pub headers: Vec<(String, String)>,
    /// Body bytes. Empty for bodiless requests.
    pub body: Bytes,
}

impl RecordedRequest {
    /// Returns the first query parameter named `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first header named `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Parses the body as JSON.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Mock transport for testing.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use consul_acl::transport::{MockResponse, MockTransport};
/// use consul_acl::Client;
///
/// let mock = Arc::new(MockTransport::new());
/// mock.push(MockResponse::text(200, "true"));
///
/// let client = Client::builder()
///     .address("http://127.0.0.1:8500")
///     .build_with_transport(mock.clone())
///     .unwrap();
/// # let _ = client;
/// assert_eq!(mock.request_count(), 0);
/// ```
pub struct MockTransport {
    /// Scripted responses, served front to back.
    responses: RwLock<VecDeque<MockResponse>>,
    /// Requests received so far.
    requests: RwLock<Vec<RecordedRequest>>,
    /// Request counter.
    request_count: AtomicU64,
    /// Failure returned instead of the next response.
    simulate_failure: RwLock<Option<Error>>,
    /// Latency reported on every response.
    latency: Duration,
}

impl MockTransport {
    /// Creates a mock with no scripted responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(VecDeque::new()),
            requests: RwLock::new(Vec::new()),
            request_count: AtomicU64::new(0),
            simulate_failure: RwLock::new(None),
            latency: Duration::from_millis(1),
        }
    }

    /// Queues a response.
    pub fn push(&self, response: MockResponse) {
        self.responses.write().push_back(response);
    }

    /// Fails the next request with `error`.
    pub fn set_failure(&self, error: Error) {
        *self.simulate_failure.write() = Some(error);
    }

    /// Clears any simulated failure.
    pub fn clear_failure(&self) {
        *self.simulate_failure.write() = None;
    }

    /// Returns the number of requests received.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Returns all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.read().last().cloned()
    }

    /// Returns the number of scripted responses not yet served.
    pub fn pending_responses(&self) -> usize {
        self.responses.read().len()
    }

    fn check_failure(&self) -> Result<(), Error> {
        let failure = self.simulate_failure.write().take();
        if let Some(error) = failure {
            return Err(error);
        }
        Ok(())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .field("pending_responses", &self.pending_responses())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        self.request_count.fetch_add(1, Ordering::Relaxed);

        let body = match request.body {
            RequestBody::Empty => Bytes::new(),
            RequestBody::Json(bytes) | RequestBody::Raw(bytes) => bytes,
            RequestBody::Stream(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk?);
                }
                buf.freeze()
            }
        };

        let description = format!("{} {}", request.method, request.path);
        self.requests.write().push(RecordedRequest {
            method: request.method,
            path: request.path,
            params: request.params,
            headers: request.headers,
            body,
        });

        self.check_failure()?;

        let scripted = self.responses.write().pop_front().ok_or_else(|| {
            Error::transport(format!(
                "mock transport has no scripted response for {}",
                description
            ))
        })?;

        Ok(HttpResponse {
            status: scripted.status,
            headers: scripted.headers,
            body: scripted.body,
            elapsed: self.latency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn get(path: &str) -> HttpRequest {
        HttpRequest {
            method: Method::Get,
            path: path.into(),
            params: vec![],
            headers: vec![],
            body: RequestBody::Empty,
        }
    }

    #[tokio::test]
    async fn test_serves_responses_in_order() {
        let mock = MockTransport::new();
        mock.push(MockResponse::text(200, "first"));
        mock.push(MockResponse::new(404));

        let first = mock.send(get("/a")).await.unwrap();
        assert_eq!(first.status, 200);
        assert_eq!(&first.body[..], b"first");

        let second = mock.send(get("/b")).await.unwrap();
        assert_eq!(second.status, 404);

        assert_eq!(mock.request_count(), 2);
        assert_eq!(mock.requests()[1].path, "/b");
    }

    #[tokio::test]
    async fn test_unscripted_request_fails() {
        let mock = MockTransport::new();
        let err = mock.send(get("/v1/acl/policies")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.message().contains("GET /v1/acl/policies"));
    }

    #[tokio::test]
    async fn test_failure_simulation() {
        let mock = MockTransport::new();
        mock.push(MockResponse::new(200));
        mock.set_failure(Error::connection("refused"));

        let err = mock.send(get("/x")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);

        // the failure is one-shot and the scripted response is still queued
        assert!(mock.send(get("/x")).await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_failure() {
        let mock = MockTransport::new();
        mock.push(MockResponse::new(200));
        mock.set_failure(Error::connection("refused"));
        mock.clear_failure();
        assert!(mock.send(get("/x")).await.is_ok());
    }

    #[tokio::test]
    async fn test_drains_stream_body() {
        let mock = MockTransport::new();
        mock.push(MockResponse::new(200));

        let chunks: Vec<std::io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"node \"\" ")),
            Ok(Bytes::from_static(b"{ policy = \"read\" }")),
        ];
        let request = HttpRequest {
            method: Method::Post,
            path: "/v1/acl/rules/translate".into(),
            params: vec![],
            headers: vec![],
            body: RequestBody::Stream(Box::pin(futures::stream::iter(chunks))),
        };
        mock.send(request).await.unwrap();

        let recorded = mock.last_request().unwrap();
        assert_eq!(&recorded.body[..], b"node \"\" { policy = \"read\" }");
    }

    #[test]
    fn test_json_response() {
        let response = MockResponse::json(200, &serde_json::json!({"a": 1}));
        assert_eq!(&response.body[..], br#"{"a":1}"#);
    }
}
