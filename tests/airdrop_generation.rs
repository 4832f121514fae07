use std::fs;

use merkle_airdrop::airdrop::{read_allocations, write_outputs, OutputOptions};
use merkle_airdrop::utils::{parse_bytes32, to_hex};
use merkle_airdrop::{hash_address_amount, AirdropReport, AirdropTree, Claim, MerkleTree};

const CSV: &str = "address,amount\n\
0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6,1000000000000000000\n\
0x1234567890123456789012345678901234567890,2500000000000000000\n\
0xabcdefabcdefabcdefabcdefabcdefabcdefabcd,42\n\
0x0000000000000000000000000000000000000000,1\n\
0x5555555555555555555555555555555555555555,7\n";

#[test]
fn csv_to_claims_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("airdrop.csv");
    fs::write(&csv_path, CSV).unwrap();

    let allocations = read_allocations(&csv_path).unwrap();
    // zero address row is dropped
    assert_eq!(allocations.len(), 4);

    let first_leaf = hash_address_amount(&allocations[0].address, allocations[0].amount);
    assert_eq!(
        to_hex(&first_leaf),
        "0x862d9f69cd1642f07c56ec6b92856ce141af9dfe404d2ab0c4685a334945ffe6"
    );

    let airdrop = AirdropTree::new(allocations.clone()).unwrap();
    let leaves: Vec<_> = allocations.iter().map(|a| a.leaf()).collect();
    assert_eq!(airdrop.root(), MerkleTree::new(&leaves).unwrap().root());

    let files = write_outputs(&airdrop, &csv_path, &OutputOptions::default()).unwrap();
    let root = parse_bytes32(fs::read_to_string(&files.root).unwrap().trim()).unwrap();
    assert_eq!(root, airdrop.root());

    let report: AirdropReport =
        serde_json::from_str(&fs::read_to_string(files.proofs.unwrap()).unwrap()).unwrap();
    assert_eq!(report.total, 4);
    for record in &report.claims {
        let claim = Claim::try_from(record).unwrap();
        assert!(airdrop.verify_claim(&claim));
    }
}

#[test]
fn missing_csv_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_allocations(&dir.path().join("nope.csv")).unwrap_err();
    assert!(err.to_string().contains("failed to open CSV file"));
}
