//! Request/response protocol shared by every ACL operation.
//!
//! Each call moves through the same stages:
//!
//! ```text
//! built ──► dispatched ──► classified ──┬─► decoded
//!                                       ├─► absent   (404, reads that allow it)
//!                                       └─► rejected (any other non-2xx)
//! ```
//!
//! - [`QueryOptions`] / [`WriteOptions`] carry per-call consistency,
//!   blocking, datacenter and token settings
//! - [`QueryMeta`] / [`WriteMeta`] carry index, staleness and latency back

mod meta;
mod options;
pub(crate) mod request;
pub(crate) mod response;

pub use meta::{QueryMeta, WriteMeta};
pub use options::{Consistency, QueryOptions, WriteOptions};
pub(crate) use request::{Request, check_segment, escape_segment};
pub(crate) use response::{Absence, Outcome};
