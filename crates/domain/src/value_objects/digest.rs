//! Content digest value objects
//!
//! Two distinct types so that a fast look-aside digest can never be passed where
//! an integrity digest is expected.

use serde::{Serialize, Serializer};
use std::fmt;

/// Fast, collision-prone digest (MD5) over email content
///
/// NOT cryptographic. Use only for quick look-aside comparisons such as
/// de-duplicating a batch. Integrity checks must go through [`StrongDigest`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeakDigest([u8; 16]);

impl WeakDigest {
    /// Algorithm label shown next to the digest in reports
    pub const ALGORITHM: &'static str = "MD5 (non-cryptographic)";

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Lowercase hex rendering
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Collision-resistant digest (SHA-256) over email content
///
/// The only digest suitable for integrity and audit trails.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrongDigest([u8; 32]);

impl StrongDigest {
    /// Algorithm label shown next to the digest in reports
    pub const ALGORITHM: &'static str = "SHA-256";

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for WeakDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakDigest({})", self.to_hex())
    }
}

impl fmt::Debug for StrongDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StrongDigest({})", self.to_hex())
    }
}

impl fmt::Display for WeakDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for StrongDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for WeakDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl Serialize for StrongDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
