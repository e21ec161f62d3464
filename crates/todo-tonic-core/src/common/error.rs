//! Error types for the todo service.
//!
//! This module defines the central `Error` enum shared by the server and the
//! client. It implements `From<Error>` for `tonic::Status` so handlers can
//! propagate failures with `?` and clients receive a meaningful status code.
//!
//! ## Error Cases
//! - `IdSpaceExhausted`: The list grew past what a 32-bit id can address.
//! - `RequestCancelled`: The client went away mid-stream.
//! - `ServiceShutdown`: A request arrived while the service was shutting down.
//! - `InvalidEndpoint`: A client was pointed at a malformed endpoint.
//! - `Connect`: A client could not reach the server.

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the todo service.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The next identifier does not fit the wire id type.
    #[error("Todo id space exhausted after {len} items")]
    IdSpaceExhausted { len: usize },

    /// The client aborted the request.
    #[error("Request cancelled by client")]
    RequestCancelled,

    /// The service is in the process of shutting down.
    #[error("Service is shutting down")]
    ServiceShutdown,

    #[error("Invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Failed to connect to `{endpoint}`: {reason}")]
    Connect { endpoint: String, reason: String },
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::IdSpaceExhausted { .. } => Status::resource_exhausted(err.to_string()),
            Error::RequestCancelled => Status::cancelled("Request was cancelled"),
            Error::ServiceShutdown => Status::unavailable("Service is shutting down"),
            Error::InvalidEndpoint { .. } => Status::invalid_argument(err.to_string()),
            Error::Connect { .. } => Status::unavailable(err.to_string()),
        }
    }
}
