#![deny(missing_docs)]

//! # lockbridge-core — Foundational Types for Lockbridge
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde` and `thiserror`
//! from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass an [`AssetId`] where an [`AccountId`]
//!    is expected.
//!
//! 2. **[`Digest`] is the only hash output type.** Every SHA-256 digest in
//!    the workspace — field digest, leaf hash, internal node, root — is a
//!    `Digest`. Positional arithmetic over flat node sequences and the
//!    proof-verification fold both operate on this one type, so the write
//!    path and any independent verifier cannot diverge on representation.

pub mod digest;
pub mod identity;

// Re-export primary types at crate root for ergonomic imports.
pub use digest::{Digest, DigestParseError};
pub use identity::{AccountId, AssetId};
