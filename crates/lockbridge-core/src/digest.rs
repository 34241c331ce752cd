//! # Digest Newtype
//!
//! [`Digest`] wraps a raw 32-byte SHA-256 output. Digests are the only
//! currency of the Merkle layer: leaf hashes, internal nodes, roots, and
//! proof neighbors are all `Digest` values.
//!
//! Serialized form is a 64-char lowercase hex string, so flat node
//! sequences survive any JSON-speaking storage engine byte-identically.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors from parsing a hex-encoded digest.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DigestParseError {
    /// Input was not exactly 64 hex characters.
    #[error("digest hex must be 64 chars, got {0}")]
    InvalidLength(usize),

    /// Input contained a non-hex character.
    #[error("invalid hex at position {0}")]
    InvalidHex(usize),
}

/// A raw 32-byte SHA-256 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(
    /// The raw digest bytes.
    pub [u8; 32],
);

impl Digest {
    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Return the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from a 64-char hex string (either case).
    pub fn from_hex(s: &str) -> Result<Self, DigestParseError> {
        if s.len() != 64 {
            return Err(DigestParseError::InvalidLength(s.len()));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let hi = hex_val(chunk[0]).ok_or(DigestParseError::InvalidHex(i * 2))?;
            let lo = hex_val(chunk[1]).ok_or(DigestParseError::InvalidHex(i * 2 + 1))?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Digest(bytes))
    }
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(D::Error::custom)
    }
}
