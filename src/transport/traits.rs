//! Transport trait definitions and common types.
//!
//! The transport is the only part of the client that touches the network.
//! It receives a fully built [`HttpRequest`] and returns the raw
//! [`HttpResponse`] with the round-trip latency, whatever the status.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::Error;

// ============================================================================
// Request
// ============================================================================

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Returns the method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A streamed request body.
pub type BodyStream = BoxStream<'static, std::io::Result<Bytes>>;

/// Payload of an outbound request. At most one source per request.
pub enum RequestBody {
    /// No body.
    Empty,
    /// A serialized JSON document.
    Json(Bytes),
    /// Raw text.
    Raw(Bytes),
    /// Raw text read from a stream. Never replayed.
    Stream(BodyStream),
}

impl RequestBody {
    /// Returns `true` if the body can be sent more than once.
    pub fn is_replayable(&self) -> bool {
        !matches!(self, RequestBody::Stream(_))
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Json(bytes) => write!(f, "Json({} bytes)", bytes.len()),
            RequestBody::Raw(bytes) => write!(f, "Raw({} bytes)", bytes.len()),
            RequestBody::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// A fully built request, ready to be sent.
///
/// `path` is absolute (`/v1/acl/...`) and already percent-encoded.
/// `params` are encoded by the transport.
#[derive(Debug)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute, percent-encoded path.
    pub path: String,
    /// Query parameters, in order.
    pub params: Vec<(String, String)>,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
    /// Payload.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Returns the first query parameter named `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first header named `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

// ============================================================================
// Response
// ============================================================================

/// A raw response, before classification.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// The complete body.
    pub body: Bytes,
    /// Round-trip latency of the exchange.
    pub elapsed: Duration,
}

impl HttpResponse {
    /// Returns the first header named `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends requests to the agent.
///
/// Implementations own connection reuse, TLS and address resolution. They
/// must return every response, including non-2xx ones, and only fail for
/// exchanges that did not produce a response.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use consul_acl::transport::{HttpRequest, HttpResponse, Transport};
/// use consul_acl::{Client, Error};
///
/// struct Offline;
///
/// #[async_trait::async_trait]
/// impl Transport for Offline {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, Error> {
///         Err(Error::connection("offline"))
///     }
/// }
///
/// let client = Client::builder()
///     .address("http://127.0.0.1:8500")
///     .build_with_transport(Arc::new(Offline))
///     .unwrap();
/// ```
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Performs one exchange.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error>;
}

// ============================================================================
// Connection Pool Config
// ============================================================================

/// Connection pool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Idle connection timeout.
    pub idle_timeout: Duration,
    /// Maximum idle connections kept per host.
    pub max_idle_per_host: usize,
    /// Timeout for establishing a connection.
    pub connect_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(90),
            max_idle_per_host: 10,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 200,
            headers: vec![("x-consul-index".into(), "42".into())],
            body: Bytes::new(),
            elapsed: Duration::ZERO,
        };
        assert_eq!(response.header("X-Consul-Index"), Some("42"));
        assert_eq!(response.header("X-Consul-KnownLeader"), None);
        assert!(response.is_success());
    }

    #[test]
    fn test_request_param_lookup() {
        let request = HttpRequest {
            method: Method::Get,
            path: "/v1/acl/tokens".into(),
            params: vec![("policy".into(), "abc".into())],
            headers: vec![],
            body: RequestBody::Empty,
        };
        assert_eq!(request.param("policy"), Some("abc"));
        assert_eq!(request.param("role"), None);
    }

    #[test]
    fn test_body_replayable() {
        assert!(RequestBody::Empty.is_replayable());
        assert!(RequestBody::Raw(Bytes::from_static(b"x")).is_replayable());
        let stream: BodyStream = Box::pin(futures::stream::empty());
        assert!(!RequestBody::Stream(stream).is_replayable());
    }

    #[test]
    fn test_pool_config_default() {
        let config = PoolConfig::default();
        assert_eq!(config.idle_timeout, Duration::from_secs(90));
        assert_eq!(config.max_idle_per_host, 10);
    }
}
