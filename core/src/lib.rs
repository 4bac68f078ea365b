//! Core components for the ZeroKit admin API client.
//!
//! Every request sent to the admin API of a ZeroKit tenant must be
//! authenticated with the tenant's 32-byte admin key. This crate implements
//! that protocol end to end:
//!
//! - **Canonicalization**: a request is flattened into a deterministic
//!   string ([`canonicalize`]).
//! - **Signing**: the canonical string is HMAC-SHA256 signed with the admin
//!   key and attached as an `Authorization: AdminKey <signature>` header.
//! - **Tenant resolution**: the tenant id is derived from the tenant's
//!   service URL (or taken from an explicit override) and validated
//!   ([`TenantId`]).
//! - **Error translation**: structured JSON error payloads on non-2xx
//!   responses become typed [`ApiError`] failures ([`translate`]).
//!
//! The HTTP transport itself is a collaborator behind the [`HttpSend`]
//! trait; `zerokit-admin-http-send-reqwest` provides a reqwest-backed
//! implementation.
//!
//! ## Example
//!
//! ```no_run
//! use zerokit_admin_core::{AdminApiClient, Config, HttpSend, Request, Response, Result};
//!
//! # #[derive(Debug)]
//! # struct MyTransport;
//! # impl HttpSend for MyTransport {
//! #     fn http_send(&self, _req: &Request) -> Result<Response> { todo!() }
//! # }
//! # fn example() -> Result<()> {
//! let client = AdminApiClient::new(
//!     Config {
//!         base_url: "https://abc12345.api.tresorit.io".to_string(),
//!         admin_key: "00".repeat(32),
//!         ..Default::default()
//!     },
//!     MyTransport,
//! )?;
//!
//! let mut req = Request::new(
//!     http::Method::POST,
//!     "https://abc12345.api.tresorit.io/admin/user/init-user-registration"
//!         .parse()
//!         .unwrap(),
//! )
//! .with_body(&br#"{"UserId":"user@example.com"}"#[..]);
//!
//! let resp = client.call(&mut req)?;
//! assert!(resp.status.is_success());
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;

mod error;
pub use error::{Error, ErrorKind, Result};

mod headers;
pub use headers::HeaderMap;

mod transport;
pub use transport::{HttpSend, Request, Response};

mod key;
pub use key::AdminKey;

mod tenant;
pub use tenant::TenantId;

mod canonical;
pub use canonical::canonicalize;

mod api_error;
pub use api_error::{translate, ApiError};

mod client;
pub use client::{AdminApiClient, Config};
