//! Hash Utilities
//! Keccak-256 hashing and the leaf/node encodings shared with the on-chain verifier

use sha3::{Digest as Sha3Digest, Keccak256};
use web3::types::{Address, U256};

use crate::merkle::{Bytes32, MerkleError, MerkleResult};

/// Hash a byte slice using Keccak-256
pub fn keccak256(data: &[u8]) -> Bytes32 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash two nodes together, smaller digest first.
///
/// Digests are ordered as unsigned big-endian integers, which for fixed-size
/// arrays is plain lexicographic byte order. The ordering makes the pairing
/// commutative, so proofs carry no left/right flags.
pub fn hash_pair(a: &Bytes32, b: &Bytes32) -> Bytes32 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };

    let mut hasher = Keccak256::new();
    hasher.update(first);
    hasher.update(second);
    hasher.finalize().into()
}

/// Hash arbitrary data into a leaf
pub fn hash_data(data: &[u8]) -> Bytes32 {
    keccak256(data)
}

/// Leaf for an address + amount pair, identical to Solidity's
/// `keccak256(abi.encodePacked(address, uint256))`.
pub fn hash_address_amount(address: &Address, amount: U256) -> Bytes32 {
    let mut amount_bytes = [0u8; 32];
    amount.to_big_endian(&mut amount_bytes);
    pack_and_hash(address, &amount_bytes)
}

/// Same leaf as [`hash_address_amount`], taking the amount as a big-endian
/// magnitude of any length. Leading zero bytes are ignored; anything wider
/// than 256 bits is rejected.
pub fn hash_address_amount_be(address: &Address, amount_be: &[u8]) -> MerkleResult<Bytes32> {
    let first_nonzero = amount_be
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(amount_be.len());
    let significant = &amount_be[first_nonzero..];

    if significant.len() > 32 {
        return Err(MerkleError::AmountOverflow(format!(
            "amount needs {} bytes, at most 32 allowed",
            significant.len()
        )));
    }

    let mut amount_bytes = [0u8; 32];
    amount_bytes[32 - significant.len()..].copy_from_slice(significant);
    Ok(pack_and_hash(address, &amount_bytes))
}

fn pack_and_hash(address: &Address, amount_bytes: &Bytes32) -> Bytes32 {
    // 20 address bytes followed by 32 amount bytes
    let mut packed = [0u8; 52];
    packed[..20].copy_from_slice(address.as_bytes());
    packed[20..].copy_from_slice(amount_bytes);
    keccak256(&packed)
}
