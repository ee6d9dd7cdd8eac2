//! Transport layer: the only code that talks to the network.
//!
//! - [`Transport`]: the seam. Takes an [`HttpRequest`], returns the raw
//!   [`HttpResponse`] whatever its status.
//! - [`RestTransport`]: reqwest-based implementation (feature `rest`)
//! - [`MockTransport`]: scripted, in-memory implementation for tests
//!
//! Classification of the response (success, not found, error) happens
//! above this layer, so every transport behaves the same way.

mod mock;
#[cfg(feature = "rest")]
mod rest;
mod traits;

pub use mock::{MockResponse, MockTransport, RecordedRequest};
#[cfg(feature = "rest")]
pub use rest::{RestTransport, RestTransportBuilder};
pub use traits::{
    BodyStream, HttpRequest, HttpResponse, Method, PoolConfig, RequestBody, Transport,
};
