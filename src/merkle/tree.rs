//! Merkle tree construction, proof generation and verification

use super::{Bytes32, MerkleError, MerkleResult};
use crate::utils::{hash_pair, to_hex};

/// Immutable Merkle tree over an ordered, non-empty leaf sequence.
///
/// Leaves keep their caller-supplied order and are never sorted or
/// deduplicated; duplicates are distinct leaves by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// Tree levels: level 0 = leaves, last level = [root]
    levels: Vec<Vec<Bytes32>>,
}

impl MerkleTree {
    /// Build the tree from the given leaves
    pub fn new(leaves: &[Bytes32]) -> MerkleResult<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let mut levels = vec![leaves.to_vec()];

        while let Some(current_level) = levels.last().filter(|level| level.len() > 1) {
            let next_level = current_level
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    // Odd node out is promoted, not duplicated
                    _ => pair[0],
                })
                .collect();
            levels.push(next_level);
        }

        Ok(Self { levels })
    }

    /// Merkle root. A single-leaf tree's root is the leaf itself.
    pub fn root(&self) -> Bytes32 {
        // levels is never empty and its last level holds exactly one node
        self.levels[self.levels.len() - 1][0]
    }

    /// Proof for the first leaf equal to `target`
    pub fn proof(&self, target: &Bytes32) -> MerkleResult<Vec<Bytes32>> {
        let index = self
            .position(target)
            .ok_or_else(|| MerkleError::LeafNotFound(to_hex(target)))?;
        self.proof_at(index)
    }

    /// Proof for the leaf at `index`.
    ///
    /// Siblings are listed from the leaf level upward. A level where the
    /// tracked node is the promoted odd one contributes nothing.
    pub fn proof_at(&self, index: usize) -> MerkleResult<Vec<Bytes32>> {
        if index >= self.len() {
            return Err(MerkleError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }

        let mut proof = Vec::with_capacity(self.depth());
        let mut current_index = index;

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_index = current_index ^ 1;
            if let Some(sibling) = level.get(sibling_index) {
                proof.push(*sibling);
            }
            current_index /= 2;
        }

        Ok(proof)
    }

    /// Position of the first leaf equal to `target`
    pub fn position(&self, target: &Bytes32) -> Option<usize> {
        self.leaves().iter().position(|leaf| leaf == target)
    }

    pub fn leaves(&self) -> &[Bytes32] {
        &self.levels[0]
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    /// Always false: construction rejects empty input
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of hashing levels between the leaves and the root
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }
}

/// Verify that folding `proof` into `target` reproduces `root`.
///
/// An empty proof is only valid when `target` is itself the root,
/// i.e. for a single-leaf tree.
pub fn verify_proof(proof: &[Bytes32], root: &Bytes32, target: &Bytes32) -> bool {
    let computed = proof
        .iter()
        .fold(*target, |acc, sibling| hash_pair(&acc, sibling));
    computed == *root
}
