//! HTTP transport port

use std::future::Future;

use clinic_domain::{ApiRequest, ApiResponse};
use thiserror::Error;

/// Why a request produced no HTTP response at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request exceeded its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The server could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The base URL and path do not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for sending a fully-shaped request to the clinic API.
///
/// The transport owns the base URL; requests carry only the path. It does
/// not inspect statuses: a 401 is a successful exchange at this level.
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the status and raw body.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    fn execute(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}
