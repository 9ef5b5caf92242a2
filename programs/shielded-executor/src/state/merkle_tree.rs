//! Incremental commitment tree (generation-2)
//!
//! Append-only keccak Merkle tree over deposited commitments, using the
//! filled_subtrees pattern for O(depth) insertions. Every insertion yields
//! a new root which the pool pushes into its root accumulator, so the
//! tree keeps no root history of its own.

use anchor_lang::prelude::*;

use crate::crypto::field::{Field, ZERO_FIELD};
use crate::crypto::poseidon::hash_two_to_one;
use crate::error::ExecutorError;

/// Incremental Merkle tree over note commitments.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct CommitmentTree {
    /// Tree depth (immutable after init)
    pub depth: u8,

    /// Next leaf index to be filled (also = total leaves inserted)
    pub next_leaf_index: u32,

    /// Current root hash
    pub current_root: Field,

    /// Rightmost non-zero hash at each level
    /// Length = depth
    pub filled_subtrees: Vec<Field>,

    /// zeros[0] = empty leaf
    /// zeros[i] = hash(zeros[i-1], zeros[i-1])
    /// Length = depth + 1
    pub zeros: Vec<Field>,
}

impl CommitmentTree {
    /// 2^24 = ~16M leaves
    pub const MAX_DEPTH: u8 = 24;

    pub const MIN_DEPTH: u8 = 4;

    pub const SEED_PREFIX: &'static [u8] = b"commitment_tree";

    /// Space needed for a tree of `depth`.
    pub fn space(depth: u8) -> usize {
        let depth_usize = depth as usize;

        8 // discriminator
            + 1 // depth
            + 4 // next_leaf_index
            + 32 // current_root
            + 4 + (32 * depth_usize) // filled_subtrees (vec)
            + 4 + (32 * (depth_usize + 1)) // zeros (vec)
    }

    /// Create an empty tree.
    pub fn new(depth: u8) -> Result<Self> {
        require!(
            (Self::MIN_DEPTH..=Self::MAX_DEPTH).contains(&depth),
            ExecutorError::InvalidTreeDepth
        );

        let zeros = Self::compute_zero_values(depth);
        let filled_subtrees = zeros[..depth as usize].to_vec();
        let current_root = zeros[depth as usize];

        Ok(Self {
            depth,
            next_leaf_index: 0,
            current_root,
            filled_subtrees,
            zeros,
        })
    }

    fn compute_zero_values(depth: u8) -> Vec<Field> {
        let mut zeros = Vec::with_capacity(depth as usize + 1);
        zeros.push(ZERO_FIELD);

        for i in 1..=depth as usize {
            let prev = zeros[i - 1];
            zeros.push(hash_two_to_one(&prev, &prev));
        }

        zeros
    }

    /// Insert a commitment leaf and return `(leaf_index, new_root)`.
    ///
    /// # Errors
    /// * `MerkleTreeFull` if tree has reached capacity
    pub fn insert_leaf(&mut self, commitment: Field) -> Result<(u32, Field)> {
        require!(!self.is_full(), ExecutorError::MerkleTreeFull);

        let leaf_index = self.next_leaf_index;
        let mut current_hash = commitment;
        let mut current_index = leaf_index;

        for level in 0..self.depth as usize {
            let is_right_child = (current_index & 1) == 1;
            current_index >>= 1;

            if is_right_child {
                let left_sibling = self.filled_subtrees[level];
                current_hash = hash_two_to_one(&left_sibling, &current_hash);
            } else {
                self.filled_subtrees[level] = current_hash;
                current_hash = hash_two_to_one(&current_hash, &self.zeros[level]);
            }
        }

        self.current_root = current_hash;
        self.next_leaf_index = self
            .next_leaf_index
            .checked_add(1)
            .ok_or(error!(ExecutorError::ArithmeticOverflow))?;

        Ok((leaf_index, current_hash))
    }

    /// Root of the tree with no leaves.
    pub fn empty_root(&self) -> Field {
        self.zeros[self.depth as usize]
    }

    pub fn capacity(&self) -> u32 {
        1u32.checked_shl(self.depth as u32).unwrap_or(u32::MAX)
    }

    pub fn is_full(&self) -> bool {
        self.next_leaf_index >= self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_bounds() {
        assert!(CommitmentTree::new(3).is_err());
        assert!(CommitmentTree::new(25).is_err());
        assert!(CommitmentTree::new(4).is_ok());
        assert!(CommitmentTree::new(24).is_ok());
    }

    #[test]
    fn test_zero_values_deterministic() {
        let zeros1 = CommitmentTree::compute_zero_values(10);
        let zeros2 = CommitmentTree::compute_zero_values(10);
        assert_eq!(zeros1, zeros2);
        assert_eq!(zeros1.len(), 11);
    }

    #[test]
    fn test_insert_changes_root() {
        let mut tree = CommitmentTree::new(4).unwrap();
        let empty = tree.current_root;
        assert_eq!(empty, tree.empty_root());

        let (index, root1) = tree.insert_leaf([1u8; 32]).unwrap();
        assert_eq!(index, 0);
        assert_ne!(root1, empty);

        let (index, root2) = tree.insert_leaf([2u8; 32]).unwrap();
        assert_eq!(index, 1);
        assert_ne!(root2, root1);
        assert_eq!(tree.current_root, root2);
    }

    #[test]
    fn test_two_leaf_root_matches_manual_hash() {
        let mut tree = CommitmentTree::new(4).unwrap();
        let a = [1u8; 32];
        let b = [2u8; 32];
        tree.insert_leaf(a).unwrap();
        let (_, root) = tree.insert_leaf(b).unwrap();

        let mut node = hash_two_to_one(&a, &b);
        for level in 1..4 {
            node = hash_two_to_one(&node, &tree.zeros[level]);
        }
        assert_eq!(root, node);
    }

    #[test]
    fn test_tree_full() {
        let mut tree = CommitmentTree::new(4).unwrap();
        for i in 0..16u8 {
            tree.insert_leaf([i + 1; 32]).unwrap();
        }
        assert!(tree.is_full());
        assert!(tree.insert_leaf([99u8; 32]).is_err());
    }

    #[test]
    fn test_space_calculation() {
        assert_eq!(CommitmentTree::space(4), 8 + 1 + 4 + 32 + 4 + 128 + 4 + 160);
    }
}
