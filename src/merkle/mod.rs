//! Merkle Tree Module
//!
//! Binary Keccak-256 Merkle tree compatible with the on-chain claim verifier:
//! - sibling pairs are hashed smaller-digest-first
//! - an unpaired node at the end of a level is promoted unchanged
//! - proofs are plain sibling lists, verified without position flags

pub mod tree;

// Re-export main types
pub use tree::{verify_proof, MerkleTree};

/// A 32-byte digest: every leaf, node, root and proof element
pub type Bytes32 = [u8; 32];

/// Merkle engine error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Cannot build a Merkle tree from zero leaves")]
    EmptyInput,

    #[error("Target leaf not found: {0}")]
    LeafNotFound(String),

    #[error("Leaf index {index} out of bounds for {len} leaves")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type for Merkle engine operations
pub type MerkleResult<T> = Result<T, MerkleError>;
