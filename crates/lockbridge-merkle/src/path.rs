//! # Inclusion Paths
//!
//! A [`MerklePath`] proves one receipt's membership in one batch tree. It
//! carries the sibling digest and side for every level from the leaves up
//! to just below the root, leaf level first. Verification is a pure fold
//! with no tree access and no accumulator state.

use lockbridge_core::Digest;
use lockbridge_crypto::node_hash;
use serde::{Deserialize, Serialize};

/// Which side of the current node a path neighbor lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The neighbor is to the left: the current node is the right child.
    Left,
    /// The neighbor is to the right: the current node is the left child.
    Right,
}

impl Side {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of an inclusion path: a sibling digest and its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// The sibling node's digest at this level.
    pub neighbor: Digest,
    /// Which side of the current node the sibling lies on.
    pub side: Side,
}

/// An inclusion path for one receipt, ordered leaf level first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    /// Index of the tree this path proves membership in.
    pub tree_index: u64,
    /// One step per level from the leaves to just below the root.
    pub steps: Vec<PathStep>,
}

impl MerklePath {
    /// Path length: one step per tree level, `log2 P` total.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Fold a leaf digest up through `steps`, returning the implied root.
pub fn fold_path(leaf: &Digest, steps: &[PathStep]) -> Digest {
    let mut acc = *leaf;
    for step in steps {
        acc = match step.side {
            Side::Left => node_hash(&step.neighbor, &acc),
            Side::Right => node_hash(&acc, &step.neighbor),
        };
    }
    acc
}

/// Verify that `leaf` is a member of the tree with the given `root`.
///
/// Any corruption of the leaf, a neighbor, a side flag, or the root
/// makes the fold land somewhere else.
pub fn verify_merkle_path(leaf: &Digest, path: &MerklePath, root: &Digest) -> bool {
    fold_path(leaf, &path.steps) == *root
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockbridge_crypto::sha256_raw;

    fn path(steps: Vec<PathStep>) -> MerklePath {
        MerklePath {
            tree_index: 0,
            steps,
        }
    }

    #[test]
    fn empty_path_folds_to_leaf() {
        let leaf = sha256_raw(b"leaf");
        assert_eq!(fold_path(&leaf, &[]), leaf);
    }

    #[test]
    fn fold_respects_sides() {
        let leaf = sha256_raw(b"leaf");
        let sib = sha256_raw(b"sib");

        let right = path(vec![PathStep {
            neighbor: sib,
            side: Side::Right,
        }]);
        assert!(verify_merkle_path(&leaf, &right, &node_hash(&leaf, &sib)));

        let left = path(vec![PathStep {
            neighbor: sib,
            side: Side::Left,
        }]);
        assert!(verify_merkle_path(&leaf, &left, &node_hash(&sib, &leaf)));

        // Flipping the side moves the fold to the mirrored root.
        assert!(!verify_merkle_path(&leaf, &left, &node_hash(&leaf, &sib)));
    }

    #[test]
    fn corrupt_neighbor_fails() {
        let leaf = sha256_raw(b"leaf");
        let sib = sha256_raw(b"sib");
        let root = node_hash(&leaf, &sib);

        let bad = path(vec![PathStep {
            neighbor: sha256_raw(b"tampered"),
            side: Side::Right,
        }]);
        assert!(!verify_merkle_path(&leaf, &bad, &root));
    }

    #[test]
    fn two_level_fold() {
        let leaves: Vec<Digest> = (0..4u8).map(|i| sha256_raw(&[i])).collect();
        let l = node_hash(&leaves[0], &leaves[1]);
        let r = node_hash(&leaves[2], &leaves[3]);
        let root = node_hash(&l, &r);

        // Leaf 2: sibling leaf 3 on the right, then node l on the left.
        let p = path(vec![
            PathStep {
                neighbor: leaves[3],
                side: Side::Right,
            },
            PathStep {
                neighbor: l,
                side: Side::Left,
            },
        ]);
        assert!(verify_merkle_path(&leaves[2], &p, &root));
    }

    #[test]
    fn side_display() {
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(Side::Right.as_str(), "right");
    }

    #[test]
    fn path_serde_round_trip() {
        let p = path(vec![PathStep {
            neighbor: sha256_raw(b"n"),
            side: Side::Left,
        }]);
        let json = serde_json::to_string(&p).unwrap();
        let back: MerklePath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
