use std::fmt::Debug;

use bytes::Bytes;
use http::{Method, StatusCode, Uri};

use crate::headers::HeaderMap;
use crate::Result;

/// An admin API request.
///
/// The signing pipeline mutates the request in place (identity, content
/// hash and authentication headers are attached) before it is handed to
/// the transport, so a request must not be shared across concurrent calls.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL, including path and query.
    pub url: Uri,
    /// Request headers, in insertion order.
    pub headers: HeaderMap,
    /// Request body. `None` means no body is sent at all.
    pub body: Option<Bytes>,
}

impl Request {
    /// Create a request with the given method and absolute URL.
    pub fn new(method: Method, url: Uri) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Attach a body to the request.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// An admin API response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code. Non-2xx statuses are not errors at this level.
    pub status: StatusCode,
    /// Response headers, in the order received.
    pub headers: HeaderMap,
    /// Response body. `None` means the response carried no body, which is
    /// distinct from an empty one.
    pub body: Option<Bytes>,
}

/// HttpSend is the transport collaborator that executes a finalized,
/// signed request.
///
/// Implementations fail only on network-level trouble (connection,
/// resolution, TLS), reported as [`crate::ErrorKind::Transport`] - never
/// on an HTTP error status. Any transport-level resource must be released
/// on every exit path. Redirect handling, pooling, retries and timeouts
/// are implementation concerns of the transport, not of the caller.
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Execute the request and return the raw response.
    fn http_send(&self, req: &Request) -> Result<Response>;
}
