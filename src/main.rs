//! Merkle airdrop CLI
//! Roots, proofs and claim leaves compatible with the on-chain claim contract

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use merkle_airdrop::airdrop::{read_allocations, write_outputs, AirdropTree, OutputOptions};
use merkle_airdrop::merkle::{verify_proof, Bytes32, MerkleTree};
use merkle_airdrop::utils::{
    address_to_hex, hash_address_amount, hash_data, parse_address, parse_amount, parse_leaf, to_hex,
};
use merkle_airdrop::GeneratorConfig;

/// Leaves starting with 0x are taken as bytes32 values; anything else is
/// hashed with Keccak-256 first.
#[derive(Parser, Debug)]
#[command(name = "merkle-airdrop")]
#[command(about = "Generate Merkle roots and proofs for on-chain claim verification")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate Merkle root from leaves
    Root {
        #[arg(required = true)]
        leaves: Vec<String>,
    },
    /// Generate Merkle proof for a target leaf
    Proof {
        target: String,
        #[arg(required = true)]
        leaves: Vec<String>,
    },
    /// Verify a Merkle proof
    Verify {
        root: String,
        target: String,
        proof: Vec<String>,
    },
    /// Hash arbitrary data to bytes32
    Hash { data: String },
    /// Hash address + amount like keccak256(abi.encodePacked(address, uint256))
    HashAddressAmount { address: String, amount: String },
    /// Build the claim tree for an address,amount CSV file
    Generate {
        /// CSV file; overrides csv.file_path from the config
        csv: Option<PathBuf>,
        /// YAML generator config
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print every entry instead of a sample
        #[arg(long)]
        verbose: bool,
    },
}

#[derive(Serialize)]
struct ProofOutput {
    target: String,
    root: String,
    proof: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Root { leaves } => {
            let tree = MerkleTree::new(&parse_leaves(&leaves)?)?;
            println!("Merkle Root: {}", to_hex(&tree.root()));
        }
        Command::Proof { target, leaves } => {
            let target = parse_leaf(&target).context("invalid target")?;
            let tree = MerkleTree::new(&parse_leaves(&leaves)?)?;
            let proof = tree.proof(&target)?;

            let output = ProofOutput {
                target: to_hex(&target),
                root: to_hex(&tree.root()),
                proof: proof.iter().map(to_hex).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Verify { root, target, proof } => {
            let root = parse_leaf(&root).context("invalid root")?;
            let target = parse_leaf(&target).context("invalid target")?;
            let proof = parse_leaves(&proof)?;
            println!("Proof is valid: {}", verify_proof(&proof, &root, &target));
        }
        Command::Hash { data } => {
            println!("Hash: {}", to_hex(&hash_data(data.as_bytes())));
        }
        Command::HashAddressAmount { address, amount } => {
            let address = parse_address(&address)?;
            if address.is_zero() {
                bail!("zero address is not a valid claimant");
            }
            let amount = parse_amount(&amount)?;

            println!("Address: {}", address_to_hex(&address));
            println!("Amount: {}", amount);
            println!("Hash: {}", to_hex(&hash_address_amount(&address, amount)));
        }
        Command::Generate { csv, config, verbose } => generate(csv, config, verbose)?,
    }

    Ok(())
}

fn parse_leaves(args: &[String]) -> Result<Vec<Bytes32>> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| parse_leaf(arg).with_context(|| format!("invalid hex at position {}", i)))
        .collect()
}

fn generate(csv: Option<PathBuf>, config_path: Option<PathBuf>, verbose: bool) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(csv) = csv {
        config.csv.file_path = csv;
    }
    config.validate()?;

    let csv_path = config.csv.file_path.clone();
    let allocations = read_allocations(&csv_path)?;

    println!("=== Processing CSV: {} ===", csv_path.display());
    println!("Total entries: {}\n", allocations.len());

    let airdrop = AirdropTree::new(allocations)?;
    print_entries(&airdrop, verbose);

    println!("\n=== Merkle Root ===");
    println!("Root: {}\n", to_hex(&airdrop.root()));

    let first = airdrop.claim(0)?;
    let proof: Vec<String> = first.proof.iter().map(to_hex).collect();
    println!("=== Proof for First Entry ===");
    println!("Address: {}", address_to_hex(&first.allocation.address));
    println!("Amount: {}", first.allocation.amount);
    println!("Leaf: {}", to_hex(&first.leaf));
    println!("Proof: [{}]", proof.join(", "));
    println!("Proof verification: {}\n", airdrop.verify_claim(&first));

    println!("=== Solidity Contract Call ===");
    println!(
        "verifyAddress([{}], {}, {}, {})",
        proof.join(", "),
        to_hex(&airdrop.root()),
        address_to_hex(&first.allocation.address),
        first.allocation.amount
    );

    let options: OutputOptions = config.output_options();
    let files = write_outputs(&airdrop, &csv_path, &options)?;
    println!("\nMerkle root saved to: {}", files.root.display());
    if let Some(leaves) = files.leaves {
        println!("All leaves saved to: {}", leaves.display());
    }
    if let Some(proofs) = files.proofs {
        println!("Claim proofs saved to: {}", proofs.display());
    }

    Ok(())
}

fn print_entries(airdrop: &AirdropTree, verbose: bool) {
    let leaves = airdrop.tree().leaves();
    let last = airdrop.len() - 1;

    for (i, (allocation, leaf)) in airdrop.allocations().iter().zip(leaves).enumerate() {
        if verbose || i < 5 || i == last {
            println!(
                "Entry {}: {} (amount: {}) -> Leaf: {}",
                i + 1,
                address_to_hex(&allocation.address),
                allocation.amount,
                to_hex(leaf)
            );
        } else if i == 5 {
            println!("... (showing first 5 and last entry, use --verbose for all entries)");
        }
    }
}
