//! Text encodings for digests, addresses and amounts
//!
//! Digests travel as `0x` followed by 64 lowercase hex digits. Parsing is
//! strict about the prefix and length but accepts either letter case.

use web3::types::{Address, U256};

use super::hash_utils::hash_data;
use crate::merkle::{Bytes32, MerkleError, MerkleResult};

/// Format a digest as `0x`-prefixed lowercase hex
pub fn to_hex(value: &Bytes32) -> String {
    format!("0x{}", hex::encode(value))
}

/// Format an address as `0x`-prefixed lowercase hex
pub fn address_to_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_bytes()))
}

/// Parse a `0x`-prefixed, 64 digit hex string into a digest
pub fn parse_bytes32(input: &str) -> MerkleResult<Bytes32> {
    let bytes = decode_prefixed(input, 32)?;
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Parse a `0x`-prefixed, 40 digit hex string into an address
pub fn parse_address(input: &str) -> MerkleResult<Address> {
    let bytes = decode_prefixed(input, 20)?;
    Ok(Address::from_slice(&bytes))
}

/// Parse a base-10 amount that must fit in 256 bits
pub fn parse_amount(input: &str) -> MerkleResult<U256> {
    let digits = input.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MerkleError::InvalidEncoding(format!(
            "invalid decimal amount: {:?}",
            input
        )));
    }

    U256::from_dec_str(digits).map_err(|_| {
        MerkleError::AmountOverflow(format!("{} does not fit in 256 bits", digits))
    })
}

/// Interpret a command-line leaf: `0x` input is a literal digest, anything
/// else is raw data to hash.
pub fn parse_leaf(input: &str) -> MerkleResult<Bytes32> {
    let trimmed = input.trim();
    if trimmed.starts_with("0x") {
        parse_bytes32(trimmed)
    } else {
        Ok(hash_data(trimmed.as_bytes()))
    }
}

fn decode_prefixed(input: &str, expected_len: usize) -> MerkleResult<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .ok_or_else(|| MerkleError::InvalidEncoding(format!("missing 0x prefix: {:?}", input)))?;

    if digits.len() != expected_len * 2 {
        return Err(MerkleError::InvalidEncoding(format!(
            "expected {} hex digits, got {}: {:?}",
            expected_len * 2,
            digits.len(),
            input
        )));
    }

    hex::decode(digits).map_err(|e| MerkleError::InvalidEncoding(format!("{}: {:?}", e, input)))
}
