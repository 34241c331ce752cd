//! # The Merkle Accumulator
//!
//! [`MerkleAccumulator`] turns the ledger's pending receipt tail into
//! immutable batch trees and serves inclusion-path queries over everything
//! batched so far. Like the ledger it is a single-writer state machine:
//! `record_receipts` takes `&mut self` and applies all of its effects or
//! none.

use lockbridge_core::AccountId;
use lockbridge_crypto::leaf_hash;
use lockbridge_ledger::ReceiptLedger;
use thiserror::Error;

use crate::guard::AuthorizationGuard;
use crate::path::{MerklePath, PathStep, Side};
use crate::tree::MerkleTree;

/// Errors from accumulator operations.
#[derive(Error, Debug)]
pub enum AccumulatorError {
    /// The caller is not permitted to batch.
    #[error("caller {caller} is not authorized to record receipts")]
    Unauthorized {
        /// The rejected caller.
        caller: AccountId,
    },

    /// Every receipt is already covered by a tree; nothing to batch.
    #[error("no pending receipts to record")]
    NoPendingReceipts,

    /// Query against a tree index that does not exist.
    #[error("merkle tree {index} not found: {tree_count} trees exist")]
    TreeNotFound {
        /// The index the caller asked for.
        index: u64,
        /// Number of trees stored so far.
        tree_count: u64,
    },

    /// The receipt id is not covered by any tree: either it has not been
    /// batched yet, or it was never assigned.
    #[error("receipt {receipt_id} is not covered by any merkle tree")]
    ReceiptNotBatched {
        /// The uncovered receipt id.
        receipt_id: u64,
    },
}

/// Batches receipts into append-only Merkle trees and answers path queries.
pub struct MerkleAccumulator {
    guard: Box<dyn AuthorizationGuard>,
    next_unbatched_id: u64,
    trees: Vec<MerkleTree>,
}

impl std::fmt::Debug for MerkleAccumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerkleAccumulator")
            .field("next_unbatched_id", &self.next_unbatched_id)
            .field("tree_count", &self.trees.len())
            .finish()
    }
}

impl MerkleAccumulator {
    /// Create an empty accumulator gated by `guard`.
    pub fn new(guard: Box<dyn AuthorizationGuard>) -> Self {
        Self {
            guard,
            next_unbatched_id: 0,
            trees: Vec::new(),
        }
    }

    /// The boundary between batched and pending receipts. Only moves
    /// forward.
    pub fn next_unbatched_id(&self) -> u64 {
        self.next_unbatched_id
    }

    /// Batch every receipt created since the last batch into one new tree.
    ///
    /// Requires guard approval for `caller`. Fails with
    /// [`AccumulatorError::NoPendingReceipts`] if the ledger holds nothing
    /// new; no state changes on any failure. Returns the new tree's index.
    pub fn record_receipts(
        &mut self,
        ledger: &ReceiptLedger,
        caller: &AccountId,
    ) -> Result<u64, AccumulatorError> {
        if !self.guard.is_authorized(caller) {
            return Err(AccumulatorError::Unauthorized {
                caller: caller.clone(),
            });
        }

        let pending = ledger.receipts_from(self.next_unbatched_id);
        if pending.is_empty() {
            return Err(AccumulatorError::NoPendingReceipts);
        }
        // Ids are dense, so the pending tail starts exactly at the boundary.
        debug_assert_eq!(pending[0].id, self.next_unbatched_id);

        let leaves: Vec<_> = pending
            .iter()
            .map(|r| leaf_hash(r.amount, &r.label, r.id))
            .collect();

        let index = self.trees.len() as u64;
        let tree = MerkleTree::build(index, self.next_unbatched_id, &leaves);
        self.next_unbatched_id += pending.len() as u64;
        self.trees.push(tree);
        Ok(index)
    }

    /// Number of trees recorded so far.
    pub fn merkle_tree_count(&self) -> u64 {
        self.trees.len() as u64
    }

    /// The tree at `index`.
    pub fn merkle_tree(&self, index: u64) -> Result<&MerkleTree, AccumulatorError> {
        self.trees
            .get(index as usize)
            .ok_or(AccumulatorError::TreeNotFound {
                index,
                tree_count: self.merkle_tree_count(),
            })
    }

    /// Generate the inclusion path for `receipt_id`.
    ///
    /// Locates the unique tree covering the id, then walks from the leaf
    /// level to the level below the root. At each level the sibling is at
    /// `i ^ 1` within the level's block; the neighbor lies left exactly
    /// when `i` is odd. Steps come out leaf level first.
    pub fn generate_merkle_path(&self, receipt_id: u64) -> Result<MerklePath, AccumulatorError> {
        let tree = self.tree_covering(receipt_id)?;

        let mut i = (receipt_id - tree.first_receipt_id()) as usize;
        let mut level_start = 0;
        let mut width = tree.padded_leaf_count() as usize;
        let mut steps = Vec::with_capacity(tree.path_length() as usize);
        while width > 1 {
            let side = if i % 2 == 1 { Side::Left } else { Side::Right };
            steps.push(PathStep {
                neighbor: tree.nodes()[level_start + (i ^ 1)],
                side,
            });
            level_start += width;
            width /= 2;
            i /= 2;
        }

        Ok(MerklePath {
            tree_index: tree.index(),
            steps,
        })
    }

    /// The unique tree whose id range contains `receipt_id`.
    fn tree_covering(&self, receipt_id: u64) -> Result<&MerkleTree, AccumulatorError> {
        // Trees are stored in creation order with contiguous ascending
        // ranges; binary search for the last tree starting at or before id.
        let idx = self
            .trees
            .partition_point(|t| t.first_receipt_id() <= receipt_id);
        idx.checked_sub(1)
            .map(|i| &self.trees[i])
            .filter(|t| t.covers(receipt_id))
            .ok_or(AccumulatorError::ReceiptNotBatched { receipt_id })
    }
}
