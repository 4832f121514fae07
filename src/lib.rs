// Core engine
pub mod merkle;
pub mod utils;

// Airdrop tooling on top of the engine
pub mod airdrop;
pub mod config;

// Re-export main types for easy access
pub use merkle::{verify_proof, Bytes32, MerkleError, MerkleResult, MerkleTree};
pub use utils::{hash_address_amount, hash_address_amount_be, hash_data, hash_pair, keccak256, parse_bytes32, to_hex};
pub use airdrop::{AirdropReport, AirdropTree, Allocation, Claim, ClaimRecord};
pub use config::GeneratorConfig;
