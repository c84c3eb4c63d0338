//! HTTP surface of the backend, expressed as plain request/response data.
//!
//! Nothing here performs I/O. [`ApiClient`] builds [`ApiRequest`]s that the
//! plugin shim sends through Zellij, and [`decode_response`] turns the
//! delivered result back into an [`ApiEvent`].
//!
//! # Modules
//!
//! - [`request`]: endpoint builders, headers, sequence context
//! - [`response`]: status checks, body decoding, failure taxonomy
//! - [`trace`]: `traceparent` propagation

pub mod request;
pub mod response;
pub mod trace;

pub use request::{ApiClient, ApiRequest, FeedSource, HttpMethod, RequestKind, DEFAULT_BASE_URL};
pub use response::{decode_response, ApiEvent, ApiFailure, ApiResult};
