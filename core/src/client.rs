use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use http::Uri;
use log::debug;

use crate::api_error::translate;
use crate::canonical::canonicalize;
use crate::hash::{base64_hmac_sha256, hex_sha256};
use crate::time::{format_tresorit_date, now, DateTime};
use crate::{AdminKey, Error, HttpSend, Request, Response, Result, TenantId};

/// SHA-256 hex digest of an empty input, used when a request has no body.
const EMPTY_CONTENT_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Configuration for [`AdminApiClient`].
///
/// All configuration is passed in explicitly; the client never consults
/// process-wide environment variables.
#[derive(Clone, Default)]
pub struct Config {
    /// Service URL of the tenant, from the management portal.
    pub base_url: String,
    /// Admin key of the tenant as a 64-character hex string (32 bytes),
    /// from the management portal.
    pub admin_key: String,
    /// Explicit tenant id. When unset, the tenant id is derived from
    /// `base_url`.
    pub tenant_id: Option<String>,
    /// Turn off automatic translation of structured API error bodies.
    /// Translation is enabled by default.
    pub disable_error_translation: bool,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("admin_key", &"***")
            .field("tenant_id", &self.tenant_id)
            .field("disable_error_translation", &self.disable_error_translation)
            .finish()
    }
}

/// A client for the admin API of a single ZeroKit tenant.
///
/// The client signs every outgoing request with the tenant admin key,
/// delegates execution to the [`HttpSend`] transport collaborator and, by
/// default, translates structured error payloads of non-2xx responses into
/// [`crate::ApiError`] failures.
///
/// Key, tenant id and admin identity are fixed at construction, so a client
/// can be shared freely across threads. A single [`Request`] is mutated in
/// place while being signed and must not be shared across concurrent calls.
#[derive(Clone)]
pub struct AdminApiClient {
    http: Arc<dyn HttpSend>,
    key: AdminKey,
    tenant_id: TenantId,
    admin_user_id: String,
    translate_errors: bool,
    time: Option<DateTime>,
}

impl Debug for AdminApiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApiClient")
            .field("http", &self.http)
            .field("key", &self.key)
            .field("tenant_id", &self.tenant_id)
            .field("admin_user_id", &self.admin_user_id)
            .field("translate_errors", &self.translate_errors)
            .finish()
    }
}

impl AdminApiClient {
    /// Create a client from the given configuration and transport.
    ///
    /// Fails with [`crate::ErrorKind::ConfigInvalid`] when the service URL
    /// is malformed, the admin key is not 64 hex characters, or no valid
    /// tenant id can be obtained.
    pub fn new(config: Config, http: impl HttpSend) -> Result<Self> {
        let url: Uri = config
            .base_url
            .parse()
            .map_err(|e| Error::config_invalid("service url is malformed").with_source(e))?;
        if url.scheme().is_none() || url.authority().is_none() {
            return Err(Error::config_invalid("service url must be absolute"));
        }

        let key = AdminKey::from_hex(&config.admin_key)?;

        let tenant_id = match &config.tenant_id {
            Some(id) => TenantId::new(id)?,
            None => TenantId::from_service_url(&config.base_url)?,
        };
        let admin_user_id = tenant_id.admin_user_id();

        Ok(Self {
            http: Arc::new(http),
            key,
            tenant_id,
            admin_user_id,
            translate_errors: !config.disable_error_translation,
            time: None,
        })
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The tenant this client is bound to.
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// The admin identity every call is issued under.
    pub fn admin_user_id(&self) -> &str {
        &self.admin_user_id
    }

    /// Sign the request, execute it and translate the outcome.
    ///
    /// The request is mutated in place: identity, content hash and
    /// authentication headers are attached before execution. Transport
    /// failures propagate unchanged. A non-2xx response whose body carries
    /// a structured error becomes an [`crate::ErrorKind::Api`] failure
    /// (unless translation is disabled); any other response, non-2xx
    /// included, is returned as is for the caller to inspect.
    pub fn call(&self, request: &mut Request) -> Result<Response> {
        self.sign(request);

        let response = self.http.http_send(request)?;

        if self.translate_errors {
            if let Some(api_error) = translate(&response) {
                debug!("admin api call failed: {api_error}");
                return Err(Error::api(api_error));
            }
        }

        Ok(response)
    }

    /// Attach identity, content hash and authentication headers.
    fn sign(&self, request: &mut Request) {
        let (content_hash, content_length) = match &request.body {
            Some(body) => (hex_sha256(body), body.len()),
            None => (EMPTY_CONTENT_SHA256.to_string(), 0),
        };

        let headers = &mut request.headers;
        headers.insert("UserId", self.admin_user_id.clone());
        headers.insert(
            "TresoritDate",
            format_tresorit_date(self.time.unwrap_or_else(now)),
        );
        headers.insert("Content-SHA256", content_hash);
        headers.insert("Content-Length", content_length.to_string());

        if !headers.contains("Content-Type") {
            headers.insert("Content-Type", "application/json");
        }

        // Pre-seed, so that HMACHeaders lists itself as well.
        headers.insert("HMACHeaders", "");
        let names: String = headers.names().collect::<Vec<_>>().join(",");
        headers.insert("HMACHeaders", names);

        let canonical = canonicalize(request);
        debug!("canonical request: {canonical}");

        let signature = base64_hmac_sha256(self.key.as_bytes(), canonical.as_bytes());
        request
            .headers
            .insert("Authorization", format!("AdminKey {signature}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, HeaderMap};
    use chrono::{TimeZone, Utc};
    use http::{Method, StatusCode};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use test_case::test_case;

    const KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    /// Transport stub that records the signed request and replies with a
    /// canned response.
    #[derive(Debug)]
    struct MockHttpSend {
        response: Response,
        seen: Arc<Mutex<Option<Request>>>,
    }

    impl MockHttpSend {
        fn replying(status: u16, body: Option<&str>) -> Self {
            Self {
                response: Response {
                    status: StatusCode::from_u16(status).unwrap(),
                    headers: HeaderMap::new(),
                    body: body.map(|b| b.as_bytes().to_vec().into()),
                },
                seen: Arc::new(Mutex::new(None)),
            }
        }

        /// Handle to the request captured by `http_send`.
        fn seen(&self) -> Arc<Mutex<Option<Request>>> {
            self.seen.clone()
        }
    }

    impl HttpSend for MockHttpSend {
        fn http_send(&self, req: &Request) -> Result<Response> {
            *self.seen.lock().unwrap() = Some(req.clone());
            Ok(self.response.clone())
        }
    }

    /// Transport stub that always fails at the network level.
    #[derive(Debug)]
    struct FailingHttpSend;

    impl HttpSend for FailingHttpSend {
        fn http_send(&self, _req: &Request) -> Result<Response> {
            Err(Error::transport("connection refused"))
        }
    }

    fn config() -> Config {
        Config {
            base_url: "https://abc12345.api.tresorit.io".to_string(),
            admin_key: KEY.to_string(),
            ..Default::default()
        }
    }

    fn client(http: impl HttpSend) -> AdminApiClient {
        AdminApiClient::new(config(), http)
            .unwrap()
            .with_time(Utc.with_ymd_and_hms(2017, 3, 14, 10, 20, 30).unwrap())
    }

    #[test]
    fn test_construction_derives_tenant_and_identity() {
        let client = AdminApiClient::new(config(), MockHttpSend::replying(200, None)).unwrap();
        assert_eq!(client.tenant_id().as_str(), "abc12345");
        assert_eq!(client.admin_user_id(), "admin@abc12345.tresorit.io");
    }

    #[test]
    fn test_explicit_tenant_id_wins_over_url() {
        let client = AdminApiClient::new(
            Config {
                base_url: "https://hosted.example.com/tenant-xyz98765".to_string(),
                admin_key: KEY.to_string(),
                tenant_id: Some("abc12345".to_string()),
                ..Default::default()
            },
            MockHttpSend::replying(200, None),
        )
        .unwrap();
        assert_eq!(client.tenant_id().as_str(), "abc12345");
    }

    #[test_case(Config { base_url: String::new(), admin_key: KEY.to_string(), ..Default::default() }; "empty base url")]
    #[test_case(Config { base_url: "https://example.com".to_string(), admin_key: KEY.to_string(), ..Default::default() }; "unresolvable tenant")]
    #[test_case(Config { base_url: "https://abc12345.api.tresorit.io".to_string(), admin_key: "0123".to_string(), ..Default::default() }; "short admin key")]
    #[test_case(Config { base_url: "https://abc12345.api.tresorit.io".to_string(), admin_key: "zz".repeat(32), ..Default::default() }; "non hex admin key")]
    #[test_case(Config { base_url: "https://abc12345.api.tresorit.io".to_string(), admin_key: KEY.to_string(), tenant_id: Some("00testtest".to_string()), ..Default::default() }; "invalid explicit tenant id")]
    fn test_construction_fails_on_bad_config(config: Config) {
        let err = AdminApiClient::new(config, MockHttpSend::replying(200, None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_sign_get_without_body() {
        let client = client(MockHttpSend::replying(200, None));
        let mut req = Request::new(
            Method::GET,
            "https://abc12345.api.tresorit.io/admin/user/get-user-id?userName=test"
                .parse()
                .unwrap(),
        );
        client.call(&mut req).unwrap();

        assert_eq!(req.headers.get("UserId"), Some("admin@abc12345.tresorit.io"));
        assert_eq!(req.headers.get("TresoritDate"), Some("2017-03-14T10:20:30Z"));
        assert_eq!(req.headers.get("Content-SHA256"), Some(EMPTY_CONTENT_SHA256));
        assert_eq!(req.headers.get("Content-Length"), Some("0"));
        assert_eq!(req.headers.get("Content-Type"), Some("application/json"));
        assert_eq!(
            req.headers.get("HMACHeaders"),
            Some("UserId,TresoritDate,Content-SHA256,Content-Length,Content-Type,HMACHeaders")
        );
        // Precomputed for KEY over the canonical string of this request.
        assert_eq!(
            req.headers.get("Authorization"),
            Some("AdminKey HUv4pq4rFQ5I/5gOdZjhQ5EpEpkIIaBYu1rqezGXBQw=")
        );
    }

    #[test]
    fn test_sign_post_with_body() {
        let client = client(MockHttpSend::replying(200, None));
        let mut req = Request::new(
            Method::POST,
            "https://abc12345.api.tresorit.io/admin/tresor/delete"
                .parse()
                .unwrap(),
        )
        .with_body(&br#"{"TresorId":"0000"}"#[..]);
        client.call(&mut req).unwrap();

        assert_eq!(
            req.headers.get("Content-SHA256"),
            Some("575ef0867b5bdbb40ceae3abbbdfbeaef96f500fa287b35abc4fc2f5b7fc23c6")
        );
        assert_eq!(req.headers.get("Content-Length"), Some("19"));
        assert_eq!(
            req.headers.get("Authorization"),
            Some("AdminKey bh0QZuA7LkCJVtYKROwTbD3228G9zc0i3cx1jCnViso=")
        );
    }

    #[test]
    fn test_caller_content_type_is_kept() {
        let client = client(MockHttpSend::replying(200, None));
        let mut req = Request::new(
            Method::GET,
            "https://abc12345.api.tresorit.io/admin/user/list"
                .parse()
                .unwrap(),
        );
        req.headers.insert("Content-Type", "text/plain");
        client.call(&mut req).unwrap();

        // The caller's Content-Type survives in its original slot, so it
        // leads the HMACHeaders listing.
        assert_eq!(req.headers.get("Content-Type"), Some("text/plain"));
        assert_eq!(
            req.headers.get("HMACHeaders"),
            Some("Content-Type,UserId,TresoritDate,Content-SHA256,Content-Length,HMACHeaders")
        );
        assert_eq!(
            req.headers.get("Authorization"),
            Some("AdminKey GggY0X6TIdoDzDCilYNwJaQvqnOwtWgxKmJouaEi3L0=")
        );
    }

    #[test]
    fn test_signing_is_deterministic() {
        let make = || {
            let client = client(MockHttpSend::replying(200, None));
            let mut req = Request::new(
                Method::GET,
                "https://abc12345.api.tresorit.io/admin/user/list"
                    .parse()
                    .unwrap(),
            );
            client.call(&mut req).unwrap();
            req.headers.get("Authorization").unwrap().to_string()
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn test_transport_sees_finalized_request() {
        let mock = MockHttpSend::replying(200, None);
        let seen = mock.seen();
        let client = client(mock);

        let mut req = Request::new(
            Method::POST,
            "https://abc12345.api.tresorit.io/admin/tresor/delete"
                .parse()
                .unwrap(),
        )
        .with_body(&br#"{"TresorId":"0000"}"#[..]);
        client.call(&mut req).unwrap();

        let sent = seen.lock().unwrap().take().unwrap();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url, req.url);
        assert_eq!(sent.body, req.body);
        // The transport received exactly the signed header set.
        assert_eq!(sent.headers, req.headers);
        assert!(sent.headers.contains("Authorization"));
    }

    #[test]
    fn test_error_body_becomes_api_error() {
        let client = client(MockHttpSend::replying(
            400,
            Some(r#"{"ErrorCode":"UserNotExists","ErrorMessage":"no such user"}"#),
        ));
        let mut req = Request::new(
            Method::POST,
            "https://abc12345.api.tresorit.io/admin/user/get-user-id"
                .parse()
                .unwrap(),
        );
        let err = client.call(&mut req).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        let api = err.api_error().unwrap();
        assert_eq!(api.code, "UserNotExists");
        assert_eq!(api.message, "no such user");
    }

    #[test]
    fn test_opaque_failure_is_returned_untouched() {
        let client = client(MockHttpSend::replying(400, Some(r#"{"foo":"bar"}"#)));
        let mut req = Request::new(
            Method::GET,
            "https://abc12345.api.tresorit.io/admin/user/list"
                .parse()
                .unwrap(),
        );
        let resp = client.call(&mut req).unwrap();

        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body.as_deref(), Some(&br#"{"foo":"bar"}"#[..]));
    }

    #[test]
    fn test_translation_can_be_disabled() {
        let client = AdminApiClient::new(
            Config {
                disable_error_translation: true,
                ..config()
            },
            MockHttpSend::replying(
                400,
                Some(r#"{"ErrorCode":"UserNotExists","ErrorMessage":"no such user"}"#),
            ),
        )
        .unwrap();
        let mut req = Request::new(
            Method::GET,
            "https://abc12345.api.tresorit.io/admin/user/list"
                .parse()
                .unwrap(),
        );
        let resp = client.call(&mut req).unwrap();
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_transport_failure_propagates() {
        let client = AdminApiClient::new(config(), FailingHttpSend).unwrap();
        let mut req = Request::new(
            Method::GET,
            "https://abc12345.api.tresorit.io/admin/user/list"
                .parse()
                .unwrap(),
        );
        let err = client.call(&mut req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_config_debug_redacts_admin_key() {
        let debug = format!("{:?}", config());
        assert!(!debug.contains(KEY));
        assert!(debug.contains("***"));
    }
}
