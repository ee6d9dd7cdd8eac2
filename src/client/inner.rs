//! Internal client implementation.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::Error;
use crate::config::Config;
use crate::protocol::response::{self, classify};
use crate::protocol::{Absence, Outcome, QueryMeta, Request, WriteMeta};
use crate::transport::{HttpResponse, Transport};

pub(crate) struct ClientInner {
    /// Immutable client configuration.
    pub config: Config,

    /// Transport every request is dispatched through.
    pub transport: Arc<dyn Transport>,
}

impl ClientInner {
    pub(crate) fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Token applied when a call does not override it.
    pub(crate) fn default_token(&self) -> Option<&str> {
        self.config.token.as_deref().filter(|token| !token.is_empty())
    }

    /// Finalizes and sends a request. The response is returned whatever
    /// its status.
    pub(crate) async fn execute(&self, request: Request) -> Result<HttpResponse, Error> {
        let method = request.method();
        let path = request.path().to_owned();
        let http = request.into_http(self.config.datacenter.as_deref(), self.default_token());

        let response = self.transport.send(http).await?;
        tracing::debug!(
            method = %method,
            path = %path,
            status = response.status,
            elapsed_ms = response.elapsed.as_millis() as u64,
            "consul request"
        );
        Ok(response)
    }

    async fn dispatch(&self, request: Request, absence: Absence) -> Result<Outcome, Error> {
        let path = request.path().to_owned();
        let outcome = classify(self.execute(request).await?, absence)?;
        if let Outcome::Absent(_) = &outcome {
            tracing::trace!(path = %path, "resource not found");
        }
        Ok(outcome)
    }

    async fn dispatch_found(&self, request: Request) -> Result<HttpResponse, Error> {
        match self.dispatch(request, Absence::Error).await? {
            Outcome::Found(response) => Ok(response),
            Outcome::Absent(response) => Err(Error::from_response(
                response.status,
                &String::from_utf8_lossy(&response.body),
            )),
        }
    }

    /// Read whose 404 is an error.
    pub(crate) async fn query<T>(&self, request: Request) -> Result<(T, QueryMeta), Error>
    where
        T: DeserializeOwned,
    {
        let response = self.dispatch_found(request).await?;
        let meta = QueryMeta::from_response(&response);
        Ok((response::decode_json(&response.body)?, meta))
    }

    /// Read whose 404 means "does not exist".
    pub(crate) async fn query_optional<T>(
        &self,
        request: Request,
    ) -> Result<(Option<T>, QueryMeta), Error>
    where
        T: DeserializeOwned,
    {
        match self.dispatch(request, Absence::Allowed).await? {
            Outcome::Found(response) => {
                let meta = QueryMeta::from_response(&response);
                Ok((Some(response::decode_json(&response.body)?), meta))
            }
            Outcome::Absent(response) => Ok((None, QueryMeta::from_response(&response))),
        }
    }

    /// Read of a JSON array. `null` is an empty list.
    pub(crate) async fn query_list<T>(&self, request: Request) -> Result<(Vec<T>, QueryMeta), Error>
    where
        T: DeserializeOwned,
    {
        let response = self.dispatch_found(request).await?;
        let meta = QueryMeta::from_response(&response);
        Ok((response::decode_list(&response.body)?, meta))
    }

    /// Read of a JSON array of which only the first element matters.
    pub(crate) async fn query_first<T>(
        &self,
        request: Request,
    ) -> Result<(Option<T>, QueryMeta), Error>
    where
        T: DeserializeOwned,
    {
        let response = self.dispatch_found(request).await?;
        let meta = QueryMeta::from_response(&response);
        Ok((response::decode_first(&response.body)?, meta))
    }

    /// Read of a plain-text body.
    pub(crate) async fn query_text(
        &self,
        request: Request,
        what: &str,
    ) -> Result<(String, QueryMeta), Error> {
        let response = self.dispatch_found(request).await?;
        let meta = QueryMeta::from_response(&response);
        Ok((response::read_text(&response.body, what)?, meta))
    }

    /// Write whose response body decodes into `T`.
    pub(crate) async fn write<T>(&self, request: Request) -> Result<(T, WriteMeta), Error>
    where
        T: DeserializeOwned,
    {
        let response = self.dispatch_found(request).await?;
        let meta = WriteMeta::from_response(&response);
        Ok((response::decode_json(&response.body)?, meta))
    }

    /// Write whose response body is ignored.
    pub(crate) async fn write_discard(&self, request: Request) -> Result<WriteMeta, Error> {
        let response = self.dispatch_found(request).await?;
        Ok(WriteMeta::from_response(&response))
    }
}
