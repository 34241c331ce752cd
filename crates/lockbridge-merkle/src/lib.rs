#![deny(missing_docs)]

//! # lockbridge-merkle — Merkle Accumulator
//!
//! The second stage of the Lockbridge accumulator pair. The accumulator
//! reads pending receipts from the ledger, batches them into immutable
//! padded complete binary trees, and answers inclusion-path queries that
//! any independent verifier can check against the stored root.
//!
//! ## Design
//!
//! - Each batch becomes one [`MerkleTree`]: the pending receipts' leaf
//!   hashes in id order, padded to a power-of-two leaf count by repeating
//!   the last real leaf, then combined pairwise level by level. Nodes are
//!   stored as one flat level-ordered sequence (leaves first, root last);
//!   path generation is positional arithmetic over that sequence.
//! - Trees cover contiguous, non-overlapping receipt-id ranges. The
//!   boundary between batched and pending receipts only moves forward.
//! - [`verify_merkle_path`] is a pure fold over the same hash primitive the
//!   write path used. It needs no accumulator state, just the leaf, the
//!   path, and the claimed root.

pub mod accumulator;
pub mod guard;
pub mod path;
pub mod tree;

// Re-export primary types.
pub use accumulator::{AccumulatorError, MerkleAccumulator};
pub use guard::{AuthorizationGuard, OwnerGuard};
pub use path::{fold_path, verify_merkle_path, MerklePath, PathStep, Side};
pub use tree::MerkleTree;
