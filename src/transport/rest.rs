//! REST transport implementation using reqwest.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::Error;
use crate::config::{Config, RetryConfig, TlsConfig};
use crate::error::ErrorKind;
use crate::transport::traits::{
    HttpRequest, HttpResponse, Method, PoolConfig, RequestBody, Transport,
};
use crate::user_agent;

// ============================================================================
// REST Transport
// ============================================================================

/// HTTP transport using reqwest.
///
/// Reuses connections across calls, applies TLS settings, and reconnects
/// with backoff when the agent cannot be reached. Status codes are never
/// retried.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: Url,
    retry_config: RetryConfig,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Creates a new REST transport builder.
    pub fn builder() -> RestTransportBuilder {
        RestTransportBuilder::new()
    }

    /// Creates a transport from a client configuration.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(
            config.base_url()?,
            &config.tls,
            &config.pool,
            config.retry.clone(),
            config.timeout,
        )
    }

    /// Creates a new REST transport with the given configuration.
    pub fn new(
        base_url: Url,
        tls_config: &TlsConfig,
        pool_config: &PoolConfig,
        retry_config: RetryConfig,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(pool_config.connect_timeout)
            .pool_max_idle_per_host(pool_config.max_idle_per_host)
            .pool_idle_timeout(pool_config.idle_timeout)
            .user_agent(user_agent::user_agent());

        if tls_config.skip_verification {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref ca_cert_file) = tls_config.ca_cert_file {
            let cert_pem = std::fs::read(ca_cert_file).map_err(|e| {
                Error::configuration(format!(
                    "failed to read CA certificate {:?}: {}",
                    ca_cert_file, e
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| {
                Error::configuration(format!("invalid CA certificate {:?}: {}", ca_cert_file, e))
            })?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        if let Some(ref ca_cert_pem) = tls_config.ca_cert_pem {
            let cert = reqwest::Certificate::from_pem(ca_cert_pem.as_bytes()).map_err(|e| {
                Error::configuration(format!("invalid CA certificate PEM: {}", e))
            })?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        if let (Some(cert_file), Some(key_file)) =
            (&tls_config.client_cert_file, &tls_config.client_key_file)
        {
            let read = |path: &std::path::Path| {
                std::fs::read(path).map_err(|e| {
                    Error::configuration(format!("failed to read {:?}: {}", path, e))
                })
            };
            let cert = read(cert_file)?;
            let key = read(key_file)?;
            client_builder = client_builder.identity(client_identity(&cert, &key)?);
        }

        let client = client_builder.build().map_err(|e| {
            Error::configuration(format!("failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url,
            retry_config,
        })
    }

    /// Returns the agent base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, path: &str, params: &[(String, String)]) -> Result<Url, Error> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| Error::configuration(format!("invalid URL path {}: {}", path, e)))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    fn build_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        // User-Agent is set on the client in new()

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                Error::invalid_argument(format!("invalid header name: {}", name))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                Error::invalid_argument(format!("invalid value for header {}", name))
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Executes a request, reconnecting on connection failures.
    async fn execute_with_retry<F, Fut>(&self, make_request: F) -> Result<reqwest::Response, Error>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempt = 0;

        loop {
            match make_request().await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_connect() && attempt < self.retry_config.max_retries => {
                    attempt += 1;
                    let delay = self.retry_config.delay_for_attempt(attempt);
                    tracing::warn!(
                        attempt,
                        max_retries = self.retry_config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "agent unreachable, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(map_reqwest_error(e)),
            }
        }
    }
}

#[async_trait::async_trait]
impl Transport for RestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let url = self.build_url(&request.path, &request.params)?;
        let headers = self.build_headers(&request.headers)?;
        let method = reqwest_method(request.method);
        let started = Instant::now();

        let response = match request.body {
            RequestBody::Stream(stream) => self
                .client
                .request(method, url)
                .headers(headers)
                .header(CONTENT_TYPE, "text/plain")
                .body(reqwest::Body::wrap_stream(stream))
                .send()
                .await
                .map_err(map_reqwest_error)?,
            body => {
                let payload = match body {
                    RequestBody::Json(bytes) => Some((bytes, "application/json")),
                    RequestBody::Raw(bytes) => Some((bytes, "text/plain")),
                    _ => None,
                };
                self.execute_with_retry(|| {
                    let mut builder = self
                        .client
                        .request(method.clone(), url.clone())
                        .headers(headers.clone());
                    if let Some((bytes, content_type)) = &payload {
                        builder = builder
                            .header(CONTENT_TYPE, *content_type)
                            .body(bytes.clone());
                    }
                    builder.send()
                })
                .await?
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_owned(), value.to_owned()))
            })
            .collect();
        let body = response.bytes().await.map_err(|e| {
            Error::new(
                ErrorKind::Transport,
                format!("failed to read response body: {}", e),
            )
            .with_source(e)
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
            elapsed: started.elapsed(),
        })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Put => reqwest::Method::PUT,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[cfg(feature = "rustls")]
fn client_identity(cert: &[u8], key: &[u8]) -> Result<reqwest::Identity, Error> {
    let mut pem = cert.to_vec();
    pem.push(b'\n');
    pem.extend_from_slice(key);
    reqwest::Identity::from_pem(&pem)
        .map_err(|e| Error::configuration(format!("invalid client certificate: {}", e)))
}

#[cfg(not(feature = "rustls"))]
fn client_identity(cert: &[u8], key: &[u8]) -> Result<reqwest::Identity, Error> {
    reqwest::Identity::from_pkcs8_pem(cert, key)
        .map_err(|e| Error::configuration(format!("invalid client certificate: {}", e)))
}

// ============================================================================
// REST Transport Builder
// ============================================================================

/// Builder for REST transport.
pub struct RestTransportBuilder {
    base_url: Option<Url>,
    tls_config: TlsConfig,
    pool_config: PoolConfig,
    retry_config: RetryConfig,
    timeout: Duration,
}

impl RestTransportBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            tls_config: TlsConfig::default(),
            pool_config: PoolConfig::default(),
            retry_config: RetryConfig::default(),
            timeout: crate::config::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, Error> {
        self.base_url = Some(
            Url::parse(url.as_ref())
                .map_err(|e| Error::configuration(format!("invalid base URL: {}", e)))?,
        );
        Ok(self)
    }

    /// Sets the TLS configuration.
    pub fn tls_config(mut self, config: TlsConfig) -> Self {
        self.tls_config = config;
        self
    }

    /// Sets the connection pool configuration.
    pub fn pool_config(mut self, config: PoolConfig) -> Self {
        self.pool_config = config;
        self
    }

    /// Sets the retry configuration.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the REST transport.
    pub fn build(self) -> Result<RestTransport, Error> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::configuration("base URL is required"))?;

        RestTransport::new(
            base_url,
            &self.tls_config,
            &self.pool_config,
            self.retry_config,
            self.timeout,
        )
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps reqwest errors to client errors.
fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(format!("request timed out: {}", e)).with_source(e)
    } else if e.is_connect() {
        Error::connection(format!("connection failed: {}", e)).with_source(e)
    } else if e.is_builder() {
        Error::invalid_argument(format!("invalid request: {}", e)).with_source(e)
    } else {
        Error::transport(format!("HTTP error: {}", e)).with_source(e)
    }
}

// ============================================================================
// Tests
// ============================================================================
