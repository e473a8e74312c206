//! Content fingerprint pairing a weak and a strong digest

use serde::Serialize;

use crate::value_objects::{StrongDigest, WeakDigest};

/// Digest pair over the exact bytes of an evaluated email
///
/// Used for audit, de-duplication and report identity. Only `strong` may
/// back an integrity claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fingerprint {
    /// MD5, look-aside comparisons only
    pub weak: WeakDigest,
    /// SHA-256, integrity and audit
    pub strong: StrongDigest,
}

impl Fingerprint {
    #[must_use]
    pub const fn new(weak: WeakDigest, strong: StrongDigest) -> Self {
        Self { weak, strong }
    }

    /// Whether two fingerprints refer to the same content, judged by the strong digest
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.strong == other.strong
    }

    /// Short identifier derived from the strong digest, for file names and logs
    #[must_use]
    pub fn short_id(&self) -> String {
        self.strong.to_hex()[..12].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_content_uses_strong_digest() {
        let a = Fingerprint::new(
            WeakDigest::from_bytes([1; 16]),
            StrongDigest::from_bytes([7; 32]),
        );
        let b = Fingerprint::new(
            WeakDigest::from_bytes([2; 16]),
            StrongDigest::from_bytes([7; 32]),
        );
        assert!(a.same_content(&b));
    }

    #[test]
    fn short_id_is_strong_prefix() {
        let fp = Fingerprint::new(
            WeakDigest::from_bytes([0; 16]),
            StrongDigest::from_bytes([0xff; 32]),
        );
        assert_eq!(fp.short_id(), "ffffffffffff");
    }

    #[test]
    fn serializes_both_digests() {
        let fp = Fingerprint::new(
            WeakDigest::from_bytes([0; 16]),
            StrongDigest::from_bytes([0; 32]),
        );
        let json = serde_json::to_value(fp).unwrap();
        assert_eq!(json["weak"].as_str().unwrap().len(), 32);
        assert_eq!(json["strong"].as_str().unwrap().len(), 64);
    }
}
