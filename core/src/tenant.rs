use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, Result};

static TENANT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[a-z][a-z0-9]{7,9}\z").expect("valid tenant id pattern"));

// Production tenants live on their own subdomain: https://<tenantid>.<host>
static PRODUCTION_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\Ahttps?://([a-z][a-z0-9]{7,9})\.[^/?#]*/?\z").expect("valid production pattern")
});

// Hosted tenants live under a path segment: https://<host>/tenant-<tenantid>/
static HOSTED_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\Ahttps?://[^/?#]*/tenant-([a-z][a-z0-9]{7,9})/?\z").expect("valid hosted pattern")
});

/// A validated tenant identifier.
///
/// A tenant id is a lowercase letter followed by 7 to 9 lowercase
/// alphanumeric characters (8-10 characters total). It is fixed at client
/// construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantId(String);

impl TenantId {
    /// Validate an explicitly supplied tenant id.
    pub fn new(id: &str) -> Result<Self> {
        if !TENANT_ID.is_match(id) {
            return Err(Error::config_invalid(format!(
                "tenant id {id:?} does not match the tenant id pattern"
            )));
        }

        Ok(Self(id.to_string()))
    }

    /// Derive the tenant id from a tenant service URL.
    ///
    /// The production shape (`https://<tenantid>.<host>`) is tried first,
    /// then the hosted shape (`https://<host>/tenant-<tenantid>/`, trailing
    /// slash optional). Both require a whole-string match; the first that
    /// matches wins.
    pub fn from_service_url(base_url: &str) -> Result<Self> {
        if let Some(caps) = PRODUCTION_URL.captures(base_url) {
            return Self::new(&caps[1]);
        }

        if let Some(caps) = HOSTED_URL.captures(base_url) {
            return Self::new(&caps[1]);
        }

        Err(Error::config_invalid(format!(
            "cannot derive a tenant id from service url {base_url:?}"
        )))
    }

    /// The tenant id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The admin identity of this tenant: `admin@<tenantid>.tresorit.io`.
    ///
    /// This is the `UserId` every signed admin call is issued under; it is
    /// always derived and never independently settable.
    pub fn admin_user_id(&self) -> String {
        format!("admin@{}.tresorit.io", self.0)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
