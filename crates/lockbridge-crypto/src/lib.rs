#![deny(missing_docs)]

//! # lockbridge-crypto — Hash Primitive for Lockbridge
//!
//! One fixed digest function (SHA-256) used identically everywhere hashing
//! occurs: field digests, receipt leaf assembly, and Merkle node
//! combination. The entire proof system's soundness rests on this module
//! never varying between tree construction and verification, so both the
//! accumulator write path and the independent verifier fold call these
//! functions and nothing else.

pub mod hash;

// Re-export the full hashing surface at crate root.
pub use hash::{
    amount_digest, label_digest, leaf_hash, node_hash, receipt_id_digest, sha256_raw,
};
