//! Airdrop Module
//! Address + amount allocations, their claim tree and per-entry claim proofs

pub mod csv_reader;
pub mod output;

// Re-export main types
pub use csv_reader::{read_allocations, read_allocations_from};
pub use output::{write_outputs, OutputFiles, OutputOptions};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use web3::types::{Address, U256};

use crate::merkle::{verify_proof, Bytes32, MerkleResult, MerkleTree};
use crate::utils::{address_to_hex, hash_address_amount, parse_address, parse_amount, parse_bytes32, to_hex};

/// One airdrop entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub address: Address,
    pub amount: U256,
}

impl Allocation {
    pub fn new(address: Address, amount: U256) -> Self {
        Self { address, amount }
    }

    /// Claim leaf as computed by the on-chain contract
    pub fn leaf(&self) -> Bytes32 {
        hash_address_amount(&self.address, self.amount)
    }
}

/// Everything a claimant needs to submit a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub index: usize,
    pub allocation: Allocation,
    pub leaf: Bytes32,
    pub proof: Vec<Bytes32>,
}

/// Claim tree over allocations in input order
#[derive(Debug, Clone)]
pub struct AirdropTree {
    allocations: Vec<Allocation>,
    tree: MerkleTree,
}

impl AirdropTree {
    pub fn new(allocations: Vec<Allocation>) -> MerkleResult<Self> {
        let leaves: Vec<Bytes32> = allocations.iter().map(Allocation::leaf).collect();
        let tree = MerkleTree::new(&leaves)?;
        Ok(Self { allocations, tree })
    }

    pub fn root(&self) -> Bytes32 {
        self.tree.root()
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    /// Claim for the entry at `index`
    pub fn claim(&self, index: usize) -> MerkleResult<Claim> {
        let proof = self.tree.proof_at(index)?;
        Ok(Claim {
            index,
            allocation: self.allocations[index],
            leaf: self.tree.leaves()[index],
            proof,
        })
    }

    /// Claims for every entry, in input order
    pub fn claims(&self) -> MerkleResult<Vec<Claim>> {
        (0..self.len())
            .into_par_iter()
            .map(|index| self.claim(index))
            .collect()
    }

    /// Check a claim against this tree's root
    pub fn verify_claim(&self, claim: &Claim) -> bool {
        claim.allocation.leaf() == claim.leaf && verify_proof(&claim.proof, &self.root(), &claim.leaf)
    }

    /// Serializable summary with every claim
    pub fn report(&self) -> MerkleResult<AirdropReport> {
        let claims = self.claims()?;
        Ok(AirdropReport {
            root: to_hex(&self.root()),
            total: self.len(),
            claims: claims.iter().map(ClaimRecord::from).collect(),
        })
    }
}

/// JSON form of a [`Claim`]: hex digests and a decimal amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub index: usize,
    pub address: String,
    pub amount: String,
    pub leaf: String,
    pub proof: Vec<String>,
}

impl From<&Claim> for ClaimRecord {
    fn from(claim: &Claim) -> Self {
        Self {
            index: claim.index,
            address: address_to_hex(&claim.allocation.address),
            amount: claim.allocation.amount.to_string(),
            leaf: to_hex(&claim.leaf),
            proof: claim.proof.iter().map(to_hex).collect(),
        }
    }
}

impl TryFrom<&ClaimRecord> for Claim {
    type Error = crate::merkle::MerkleError;

    fn try_from(record: &ClaimRecord) -> MerkleResult<Self> {
        Ok(Self {
            index: record.index,
            allocation: Allocation::new(parse_address(&record.address)?, parse_amount(&record.amount)?),
            leaf: parse_bytes32(&record.leaf)?,
            proof: record
                .proof
                .iter()
                .map(|p| parse_bytes32(p))
                .collect::<MerkleResult<Vec<_>>>()?,
        })
    }
}

/// Root plus all claims, as written to `<name>.proofs.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropReport {
    pub root: String,
    pub total: usize,
    pub claims: Vec<ClaimRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::MerkleError;
    use crate::utils::hash_pair;

    fn allocation(byte: u8, amount: u64) -> Allocation {
        Allocation::new(Address::repeat_byte(byte), U256::from(amount))
    }

    fn sample() -> Vec<Allocation> {
        vec![
            allocation(0x11, 1_000),
            allocation(0x22, 2_000),
            allocation(0x33, 3_000),
        ]
    }

    #[test]
    fn test_empty_airdrop_rejected() {
        assert!(matches!(AirdropTree::new(vec![]), Err(MerkleError::EmptyInput)));
    }

    #[test]
    fn test_root_matches_manual_tree() {
        let allocations = sample();
        let leaves: Vec<Bytes32> = allocations.iter().map(Allocation::leaf).collect();
        let airdrop = AirdropTree::new(allocations).unwrap();

        assert_eq!(airdrop.len(), 3);
        assert_eq!(
            airdrop.root(),
            hash_pair(&hash_pair(&leaves[0], &leaves[1]), &leaves[2])
        );
    }

    #[test]
    fn test_claims_in_order_and_valid() {
        let airdrop = AirdropTree::new(sample()).unwrap();
        let claims = airdrop.claims().unwrap();

        assert_eq!(claims.len(), 3);
        for (index, claim) in claims.iter().enumerate() {
            assert_eq!(claim.index, index);
            assert_eq!(claim.allocation, airdrop.allocations()[index]);
            assert!(airdrop.verify_claim(claim));
        }
    }

    #[test]
    fn test_tampered_amount_rejected() {
        let airdrop = AirdropTree::new(sample()).unwrap();
        let mut claim = airdrop.claim(1).unwrap();
        claim.allocation.amount = U256::from(2_001u64);
        assert!(!airdrop.verify_claim(&claim));
    }

    #[test]
    fn test_duplicate_allocations_get_own_claims() {
        let allocations = vec![allocation(0x11, 5), allocation(0x22, 6), allocation(0x11, 5)];
        let airdrop = AirdropTree::new(allocations).unwrap();

        let first = airdrop.claim(0).unwrap();
        let last = airdrop.claim(2).unwrap();
        assert_eq!(first.leaf, last.leaf);
        assert_ne!(first.proof, last.proof);
        assert!(airdrop.verify_claim(&first));
        assert!(airdrop.verify_claim(&last));
    }

    #[test]
    fn test_report_records_round_trip() {
        let airdrop = AirdropTree::new(sample()).unwrap();
        let report = airdrop.report().unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.root, to_hex(&airdrop.root()));
        assert_eq!(report.claims[0].amount, "1000");
        assert_eq!(
            report.claims[0].address,
            "0x1111111111111111111111111111111111111111"
        );

        let json = serde_json::to_string(&report).unwrap();
        let parsed: AirdropReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);

        for record in &parsed.claims {
            let claim = Claim::try_from(record).unwrap();
            assert!(airdrop.verify_claim(&claim));
        }
    }

    #[test]
    fn test_claim_out_of_range() {
        let airdrop = AirdropTree::new(sample()).unwrap();
        assert_eq!(
            airdrop.claim(3),
            Err(MerkleError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }
}
