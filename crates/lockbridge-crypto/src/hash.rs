//! # Receipt and Node Hashing
//!
//! All digests flow through [`sha256_raw`]. Scalar fields are encoded as
//! 32-byte big-endian words before hashing; labels hash as raw UTF-8.
//! A receipt's leaf hash is the digest of its three field digests
//! concatenated in fixed order (amount, label, id). Internal nodes are the
//! digest of the two child digests concatenated left-to-right, with no
//! framing between them.
//!
//! ## Encoding Invariant
//!
//! The word encodings are wire-visible: an independent verifier that
//! recomputes a leaf from the public receipt fields must produce the same
//! bytes. The known-answer fixtures below pin every encoding choice.

use lockbridge_core::Digest;
use sha2::{Digest as _, Sha256};

/// SHA-256 over raw bytes.
pub fn sha256_raw(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Digest(hasher.finalize().into())
}

/// Digest of a deposit amount, encoded as a 32-byte big-endian word.
pub fn amount_digest(amount: u128) -> Digest {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&amount.to_be_bytes());
    sha256_raw(&word)
}

/// Digest of a receipt id, encoded as a 32-byte big-endian word.
pub fn receipt_id_digest(id: u64) -> Digest {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&id.to_be_bytes());
    sha256_raw(&word)
}

/// Digest of a destination label's raw UTF-8 bytes.
pub fn label_digest(label: &str) -> Digest {
    sha256_raw(label.as_bytes())
}

/// Leaf hash for one receipt: `H(H(amount) || H(label) || H(id))`.
///
/// Field order is fixed. Each field is hashed individually first; the three
/// digests are concatenated and hashed again.
pub fn leaf_hash(amount: u128, label: &str, id: u64) -> Digest {
    let mut buf = [0u8; 96];
    buf[..32].copy_from_slice(amount_digest(amount).as_bytes());
    buf[32..64].copy_from_slice(label_digest(label).as_bytes());
    buf[64..].copy_from_slice(receipt_id_digest(id).as_bytes());
    sha256_raw(&buf)
}

/// Internal node hash: `H(left || right)`.
pub fn node_hash(left: &Digest, right: &Digest) -> Digest {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_bytes());
    buf[32..].copy_from_slice(right.as_bytes());
    sha256_raw(&buf)
}
