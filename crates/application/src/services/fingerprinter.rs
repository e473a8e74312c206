//! Fingerprint generator
//!
//! Digests the UTF-8 bytes of the exact content string; nothing is trimmed or
//! normalised beforehand.

use domain::{Fingerprint, StrongDigest, WeakDigest};
use md5::Md5;
use sha2::{Digest, Sha256};

/// Compute the weak (MD5) and strong (SHA-256) digests of `content`
#[must_use]
pub fn fingerprint(content: &str) -> Fingerprint {
    let bytes = content.as_bytes();
    let weak: [u8; 16] = Md5::digest(bytes).into();
    let strong: [u8; 32] = Sha256::digest(bytes).into();
    Fingerprint::new(WeakDigest::from_bytes(weak), StrongDigest::from_bytes(strong))
}

/// Whether `content` still matches a previously recorded fingerprint
///
/// Only the strong digest is consulted.
#[must_use]
pub fn verify_integrity(content: &str, recorded: &Fingerprint) -> bool {
    let strong: [u8; 32] = Sha256::digest(content.as_bytes()).into();
    recorded.strong == StrongDigest::from_bytes(strong)
}
