use std::fmt::{Debug, Formatter};

use crate::{Error, Result};

/// The 32-byte admin key of a tenant.
///
/// The key is configured as a 64-character hexadecimal string (as shown on
/// the management portal) and must fully decode to exactly 32 bytes. A
/// malformed key is a fatal configuration error at construction time; it is
/// never deferred to signing.
#[derive(Clone)]
pub struct AdminKey([u8; 32]);

impl AdminKey {
    /// Decode an admin key from its 64-character hex form.
    pub fn from_hex(key: &str) -> Result<Self> {
        let raw = hex::decode(key)
            .map_err(|e| Error::config_invalid("admin key is not a valid hex string").with_source(e))?;

        let raw: [u8; 32] = raw
            .try_into()
            .map_err(|_| Error::config_invalid("admin key must decode to exactly 32 bytes"))?;

        Ok(Self(raw))
    }

    /// The raw secret bytes used as the HMAC key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for AdminKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Never leak key material through Debug output.
        f.write_str("AdminKey(***)")
    }
}
