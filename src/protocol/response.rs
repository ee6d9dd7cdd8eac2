//! Response classifier and body decoders.

use serde::de::DeserializeOwned;

use crate::Error;
use crate::transport::HttpResponse;

/// Whether a 404 is a valid outcome for the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Absence {
    /// A 404 is an error like any other non-2xx status.
    Error,
    /// A 404 means "does not exist" and is not an error.
    Allowed,
}

/// A classified response.
#[derive(Debug)]
pub(crate) enum Outcome {
    /// 2xx. The body is ready for decoding.
    Found(HttpResponse),
    /// 404 on a call that allows absence.
    Absent(HttpResponse),
}

/// Turns a raw response into success, not-found or error.
///
/// Errors embed the status and an excerpt of the body. The response is
/// consumed on every path.
pub(crate) fn classify(response: HttpResponse, absence: Absence) -> Result<Outcome, Error> {
    if response.is_success() {
        return Ok(Outcome::Found(response));
    }
    if response.status == 404 && absence == Absence::Allowed {
        return Ok(Outcome::Absent(response));
    }
    let body = String::from_utf8_lossy(&response.body);
    Err(Error::from_response(response.status, &body))
}

/// Decodes a JSON body into `T`. Unknown fields are ignored.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    Ok(serde_json::from_slice(body)?)
}

/// Decodes a JSON array body. `null` decodes as empty.
pub(crate) fn decode_list<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, Error> {
    let items: Option<Vec<T>> = decode_json(body)?;
    Ok(items.unwrap_or_default())
}

/// Decodes a JSON array body and keeps its first element, if any.
pub(crate) fn decode_first<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, Error> {
    Ok(decode_list(body)?.into_iter().next())
}

/// Reads a body as text. `what` names the body in the error message.
pub(crate) fn read_text(body: &[u8], what: &str) -> Result<String, Error> {
    String::from_utf8(body.to_vec()).map_err(|e| {
        Error::invalid_response(format!("failed to read {}: {}", what, e)).with_source(e)
    })
}
