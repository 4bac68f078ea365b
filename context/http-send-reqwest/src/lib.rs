//! Blocking [`HttpSend`] transport for the ZeroKit admin API client,
//! backed by `reqwest`.

#![warn(missing_docs)]

use reqwest::blocking::Client;
use zerokit_admin_core::{Error, HeaderMap, HttpSend, Request, Response, Result};

/// A blocking transport over a shared `reqwest::blocking::Client`.
///
/// Connection lifecycle, TLS, pooling and timeouts are the client's
/// concern; configure them on the `reqwest::blocking::Client` passed to
/// [`ReqwestHttpSend::new`]. Responses are returned regardless of their
/// HTTP status, errors are raised only for network-level failures.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::blocking::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl HttpSend for ReqwestHttpSend {
    fn http_send(&self, req: &Request) -> Result<Response> {
        let mut builder = self.client.request(req.method.clone(), req.url.to_string());

        for (name, value) in req.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &req.body {
            builder = builder.body(body.to_vec());
        }

        let resp = builder
            .send()
            .map_err(|e| Error::transport("http request failed").with_source(e))?;

        let status = resp.status();
        let mut headers = HeaderMap::new();
        for (name, value) in resp.headers() {
            headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }

        let body = resp
            .bytes()
            .map_err(|e| Error::transport("reading response body failed").with_source(e))?;
        // An absent body and an empty one are indistinguishable here; the
        // translator treats both as nothing to parse.
        let body = if body.is_empty() { None } else { Some(body) };

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
