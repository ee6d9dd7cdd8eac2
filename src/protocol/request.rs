//! Request builder.
//!
//! Assembles an outbound call from a method, a path, per-call options and
//! at most one body. Nothing here touches the network.

use std::borrow::Cow;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;

use super::{Consistency, QueryOptions, WriteOptions};
use crate::Error;
use crate::transport::{BodyStream, HttpRequest, Method, RequestBody};

/// Header carrying the ACL token.
pub(crate) const TOKEN_HEADER: &str = "X-Consul-Token";

/// Percent-encodes a caller-supplied path segment.
pub(crate) fn escape_segment(segment: &str) -> Result<Cow<'_, str>, Error> {
    check_segment(segment)?;
    Ok(urlencoding::encode(segment))
}

/// Fails if `segment` is `.` or `..`. URL parsing resolves both against the
/// parent path, percent-encoded or not.
pub(crate) fn check_segment(segment: &str) -> Result<&str, Error> {
    if segment == "." || segment == ".." {
        Err(Error::precondition(format!(
            "{:?} is not a valid path segment",
            segment
        )))
    } else {
        Ok(segment)
    }
}

/// Formats a blocking-query wait as milliseconds, e.g. `"5000ms"`. A
/// positive wait under a millisecond rounds up, since zero means the
/// agent's default wait.
fn format_wait(wait: Duration) -> String {
    let millis = wait.as_millis();
    if millis == 0 && !wait.is_zero() {
        "1ms".to_owned()
    } else {
        format!("{}ms", millis)
    }
}

fn non_empty(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|value| !value.is_empty())
}

/// An outbound request under construction.
#[derive(Debug)]
pub(crate) struct Request {
    method: Method,
    path: String,
    params: Vec<(String, String)>,
    datacenter: Option<String>,
    token: Option<String>,
    body: RequestBody,
}

impl Request {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            datacenter: None,
            token: None,
            body: RequestBody::Empty,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub(crate) fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub(crate) fn method(&self) -> Method {
        self.method
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    /// Adds a query parameter.
    #[must_use]
    pub(crate) fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_owned(), value.into()));
        self
    }

    /// Applies read options.
    #[must_use]
    pub(crate) fn query_options(mut self, options: &QueryOptions) -> Self {
        if let Some(datacenter) = non_empty(&options.datacenter) {
            self.datacenter = Some(datacenter.clone());
        }
        match options.consistency {
            Consistency::Default => {}
            Consistency::Consistent => self.params.push(("consistent".into(), String::new())),
            Consistency::Stale => self.params.push(("stale".into(), String::new())),
        }
        if let Some(index) = options.wait_index.filter(|index| *index != 0) {
            self.params.push(("index".into(), index.to_string()));
        }
        if let Some(wait) = options.wait_time.filter(|wait| !wait.is_zero()) {
            self.params.push(("wait".into(), format_wait(wait)));
        }
        if let Some(token) = non_empty(&options.token) {
            self.token = Some(token.clone());
        }
        if let Some(filter) = non_empty(&options.filter) {
            self.params.push(("filter".into(), filter.clone()));
        }
        self
    }

    /// Applies write options.
    #[must_use]
    pub(crate) fn write_options(mut self, options: &WriteOptions) -> Self {
        if let Some(datacenter) = non_empty(&options.datacenter) {
            self.datacenter = Some(datacenter.clone());
        }
        if let Some(token) = non_empty(&options.token) {
            self.token = Some(token.clone());
        }
        if let Some(relay_factor) = options.relay_factor.filter(|factor| *factor != 0) {
            self.params
                .push(("relay-factor".into(), relay_factor.to_string()));
        }
        self
    }

    /// Applies read options when present.
    #[must_use]
    pub(crate) fn maybe_query_options(self, options: Option<&QueryOptions>) -> Self {
        match options {
            Some(options) => self.query_options(options),
            None => self,
        }
    }

    /// Applies write options when present.
    #[must_use]
    pub(crate) fn maybe_write_options(self, options: Option<&WriteOptions>) -> Self {
        match options {
            Some(options) => self.write_options(options),
            None => self,
        }
    }

    /// Serializes `body` as the JSON payload.
    pub(crate) fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(body).map_err(|e| {
            Error::invalid_argument(format!("failed to encode request body: {}", e)).with_source(e)
        })?;
        self.body = RequestBody::Json(Bytes::from(bytes));
        Ok(self)
    }

    /// Uses raw text as the payload.
    #[must_use]
    pub(crate) fn raw(mut self, body: Bytes) -> Self {
        self.body = RequestBody::Raw(body);
        self
    }

    /// Streams the payload.
    #[must_use]
    pub(crate) fn stream(mut self, body: BodyStream) -> Self {
        self.body = RequestBody::Stream(body);
        self
    }

    /// Finalizes the request. Per-call datacenter and token win over the
    /// client defaults.
    pub(crate) fn into_http(
        self,
        default_datacenter: Option<&str>,
        default_token: Option<&str>,
    ) -> HttpRequest {
        let mut params = Vec::with_capacity(self.params.len() + 1);
        let datacenter = self
            .datacenter
            .or_else(|| default_datacenter.filter(|dc| !dc.is_empty()).map(str::to_owned));
        if let Some(datacenter) = datacenter {
            params.push(("dc".to_owned(), datacenter));
        }
        params.extend(self.params);

        let mut headers = Vec::new();
        let token = self
            .token
            .or_else(|| default_token.filter(|token| !token.is_empty()).map(str::to_owned));
        if let Some(token) = token {
            headers.push((TOKEN_HEADER.to_owned(), token));
        }

        HttpRequest {
            method: self.method,
            path: self.path,
            params,
            headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_request() {
        let http = Request::get("/v1/acl/policies").into_http(None, None);
        assert_eq!(http.method, Method::Get);
        assert_eq!(http.path, "/v1/acl/policies");
        assert!(http.params.is_empty());
        assert!(http.headers.is_empty());
        assert!(matches!(http.body, RequestBody::Empty));
    }

    #[test]
    fn test_query_options() {
        let options = QueryOptions::new()
            .with_datacenter("dc2")
            .with_consistency(Consistency::Stale)
            .with_wait_index(42)
            .with_wait_time(Duration::from_secs(5))
            .with_filter("Name == web");
        let http = Request::get("/v1/acl/tokens")
            .query_options(&options)
            .into_http(None, None);

        assert_eq!(
            http.params,
            vec![
                ("dc".to_string(), "dc2".to_string()),
                ("stale".to_string(), String::new()),
                ("index".to_string(), "42".to_string()),
                ("wait".to_string(), "5000ms".to_string()),
                ("filter".to_string(), "Name == web".to_string()),
            ]
        );
    }

    #[test]
    fn test_consistent_mode() {
        let options = QueryOptions::new().with_consistency(Consistency::Consistent);
        let http = Request::get("/x").query_options(&options).into_http(None, None);
        assert_eq!(http.param("consistent"), Some(""));
        assert_eq!(http.param("stale"), None);
    }

    #[test]
    fn test_zero_values_are_omitted() {
        let options = QueryOptions {
            datacenter: Some(String::new()),
            wait_index: Some(0),
            wait_time: Some(Duration::ZERO),
            token: Some(String::new()),
            ..Default::default()
        };
        let http = Request::get("/x").query_options(&options).into_http(None, None);
        assert!(http.params.is_empty());
        assert!(http.headers.is_empty());
    }

    #[test]
    fn test_defaults_apply_without_override() {
        let http = Request::get("/x").into_http(Some("dc1"), Some("root"));
        assert_eq!(http.param("dc"), Some("dc1"));
        assert_eq!(http.header(TOKEN_HEADER), Some("root"));
    }

    #[test]
    fn test_per_call_options_override_defaults() {
        let options = QueryOptions::new().with_datacenter("dc2").with_token("other");
        let http = Request::get("/x")
            .query_options(&options)
            .into_http(Some("dc1"), Some("root"));
        assert_eq!(http.param("dc"), Some("dc2"));
        assert_eq!(http.header(TOKEN_HEADER), Some("other"));
        assert_eq!(http.params.len(), 1);
        assert_eq!(http.headers.len(), 1);
    }

    #[test]
    fn test_write_options() {
        let options = WriteOptions::new()
            .with_datacenter("dc3")
            .with_token("w")
            .with_relay_factor(2);
        let http = Request::put("/v1/acl/policy")
            .write_options(&options)
            .into_http(None, None);
        assert_eq!(http.param("dc"), Some("dc3"));
        assert_eq!(http.param("relay-factor"), Some("2"));
        assert_eq!(http.header(TOKEN_HEADER), Some("w"));
    }

    #[test]
    fn test_json_body() {
        let http = Request::put("/v1/acl/policy")
            .json(&serde_json::json!({"Name": "p"}))
            .unwrap()
            .into_http(None, None);
        assert!(matches!(
            &http.body,
            RequestBody::Json(bytes) if &bytes[..] == br#"{"Name":"p"}"#
        ));
    }

    #[test]
    fn test_escape_segment() {
        assert_eq!(escape_segment("plain").unwrap(), "plain");
        assert_eq!(escape_segment("a/b c").unwrap(), "a%2Fb%20c");
        assert_eq!(escape_segment("../admin").unwrap(), "..%2Fadmin");
        assert_eq!(escape_segment("...").unwrap(), "...");
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        assert!(escape_segment(".").unwrap_err().is_precondition());
        assert!(escape_segment("..").unwrap_err().is_precondition());
        assert!(check_segment("..").unwrap_err().is_precondition());
        assert_eq!(check_segment("a-1").unwrap(), "a-1");
    }

    #[test]
    fn test_sub_millisecond_wait_rounds_up() {
        let wait = |duration| {
            let options = QueryOptions::new().with_wait_time(duration);
            let http = Request::get("/v1/acl/tokens")
                .query_options(&options)
                .into_http(None, None);
            http.params
                .into_iter()
                .find(|(key, _)| key == "wait")
                .map(|(_, value)| value)
        };
        assert_eq!(wait(Duration::from_micros(500)).as_deref(), Some("1ms"));
        assert_eq!(wait(Duration::from_nanos(1)).as_deref(), Some("1ms"));
        assert_eq!(wait(Duration::from_micros(1500)).as_deref(), Some("1ms"));
        assert_eq!(wait(Duration::from_millis(250)).as_deref(), Some("250ms"));
    }
}
