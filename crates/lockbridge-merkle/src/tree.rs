//! # Batch Trees
//!
//! A [`MerkleTree`] is one batch of receipts, frozen at construction. The
//! padding rule is the non-obvious part: the leaf level is extended to a
//! power-of-two width by repeating the last real leaf hash (not a zero
//! sentinel), and a single-receipt batch still pads to two leaves.

use lockbridge_core::Digest;
use lockbridge_crypto::node_hash;
use serde::{Deserialize, Serialize};

/// An immutable Merkle tree over one batch of receipts.
///
/// `nodes` is the flat level-ordered node sequence: the `P` padded leaves
/// first, then each parent level, the root last. `tree_size == 2P - 1`.
/// Any storage engine persisting a tree must preserve this ordering;
/// path generation is positional arithmetic over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTree {
    index: u64,
    first_receipt_id: u64,
    receipt_count: u64,
    tree_size: u64,
    nodes: Vec<Digest>,
}

impl MerkleTree {
    /// Build the tree for a batch.
    ///
    /// `leaves` are the real leaf hashes in receipt-id order; must be
    /// non-empty (the accumulator rejects empty batches before getting
    /// here).
    pub(crate) fn build(index: u64, first_receipt_id: u64, leaves: &[Digest]) -> Self {
        debug_assert!(!leaves.is_empty());
        let n = leaves.len();
        // Even a single-receipt batch pads to 2 leaves.
        let padded = n.next_power_of_two().max(2);

        let mut nodes = Vec::with_capacity(2 * padded - 1);
        nodes.extend_from_slice(leaves);
        // Duplicate the last real leaf out to the padded width.
        let last = leaves[n - 1];
        nodes.resize(padded, last);

        // Combine pairwise, level by level, appending each level in order.
        let mut level_start = 0;
        let mut width = padded;
        while width > 1 {
            for i in (0..width).step_by(2) {
                let parent = node_hash(&nodes[level_start + i], &nodes[level_start + i + 1]);
                nodes.push(parent);
            }
            level_start += width;
            width /= 2;
        }

        Self {
            index,
            first_receipt_id,
            receipt_count: n as u64,
            tree_size: (2 * padded - 1) as u64,
            nodes,
        }
    }

    /// This tree's slot in the accumulator.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Id of the first receipt in this batch.
    pub fn first_receipt_id(&self) -> u64 {
        self.first_receipt_id
    }

    /// Number of real receipts in this batch (`n`, before padding).
    pub fn receipt_count(&self) -> u64 {
        self.receipt_count
    }

    /// Total node count across all levels (`2P - 1`).
    pub fn tree_size(&self) -> u64 {
        self.tree_size
    }

    /// The flat level-ordered node sequence, leaves first, root last.
    pub fn nodes(&self) -> &[Digest] {
        &self.nodes
    }

    /// The root digest (`nodes[tree_size - 1]`).
    pub fn root(&self) -> Digest {
        self.nodes[self.nodes.len() - 1]
    }

    /// Padded leaf count `P`, recovered from `tree_size = 2P - 1`.
    pub fn padded_leaf_count(&self) -> u64 {
        (self.tree_size + 1) / 2
    }

    /// Inclusion-path length for any receipt in this tree (`log2 P`).
    pub fn path_length(&self) -> u32 {
        self.padded_leaf_count().trailing_zeros()
    }

    /// Whether `receipt_id` falls inside this batch's id range.
    pub fn covers(&self, receipt_id: u64) -> bool {
        receipt_id >= self.first_receipt_id
            && receipt_id < self.first_receipt_id + self.receipt_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockbridge_crypto::{leaf_hash, sha256_raw};

    fn leaves(n: usize) -> Vec<Digest> {
        (0..n as u64).map(|i| leaf_hash(i as u128 + 1, "t", i)).collect()
    }

    #[test]
    fn single_leaf_pads_to_two() {
        let tree = MerkleTree::build(0, 0, &leaves(1));
        assert_eq!(tree.receipt_count(), 1);
        assert_eq!(tree.tree_size(), 3);
        assert_eq!(tree.padded_leaf_count(), 2);
        assert_eq!(tree.path_length(), 1);
        // Both leaf slots hold the same hash; root = H(leaf || leaf).
        assert_eq!(tree.nodes()[0], tree.nodes()[1]);
        assert_eq!(tree.root(), node_hash(&tree.nodes()[0], &tree.nodes()[1]));
    }

    #[test]
    fn two_leaves_need_no_padding() {
        let ls = leaves(2);
        let tree = MerkleTree::build(0, 0, &ls);
        assert_eq!(tree.tree_size(), 3);
        assert_eq!(tree.nodes()[..2], ls[..]);
        assert_eq!(tree.root(), node_hash(&ls[0], &ls[1]));
    }

    #[test]
    fn three_leaves_pad_with_last() {
        let ls = leaves(3);
        let tree = MerkleTree::build(0, 0, &ls);
        assert_eq!(tree.tree_size(), 7);
        assert_eq!(tree.padded_leaf_count(), 4);
        // Padding slot duplicates leaf 2.
        assert_eq!(tree.nodes()[3], ls[2]);
        let left = node_hash(&ls[0], &ls[1]);
        let right = node_hash(&ls[2], &ls[2]);
        assert_eq!(tree.nodes()[4], left);
        assert_eq!(tree.nodes()[5], right);
        assert_eq!(tree.root(), node_hash(&left, &right));
        assert_eq!(tree.root(), tree.nodes()[6]);
    }

    #[test]
    fn tree_size_formula_across_batch_sizes() {
        for (n, expected) in [(1, 3), (2, 3), (3, 7), (4, 7), (5, 15), (8, 15), (9, 31)] {
            let tree = MerkleTree::build(0, 0, &leaves(n));
            assert_eq!(tree.tree_size(), expected, "n = {n}");
            assert_eq!(tree.nodes().len() as u64, expected, "n = {n}");
        }
    }

    #[test]
    fn covers_is_half_open() {
        let tree = MerkleTree::build(2, 10, &leaves(3));
        assert!(!tree.covers(9));
        assert!(tree.covers(10));
        assert!(tree.covers(12));
        assert!(!tree.covers(13));
    }

    #[test]
    fn serde_preserves_node_order() {
        let tree = MerkleTree::build(1, 4, &leaves(5));
        let json = serde_json::to_string(&tree).unwrap();
        let back: MerkleTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
        assert_eq!(back.nodes(), tree.nodes());
        assert_eq!(back.root(), tree.root());
    }

    #[test]
    fn distinct_leaves_distinct_roots() {
        let a = MerkleTree::build(0, 0, &[sha256_raw(b"a"), sha256_raw(b"b")]);
        let b = MerkleTree::build(0, 0, &[sha256_raw(b"b"), sha256_raw(b"a")]);
        assert_ne!(a.root(), b.root());
    }
}
