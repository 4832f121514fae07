//! Result files for a generated airdrop
//!
//! For an input `airdrop.csv` this writes `airdrop.csv.root`,
//! `airdrop.csv.leaves` and `airdrop.csv.proofs.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::AirdropTree;
use crate::utils::{address_to_hex, to_hex};

pub const DEFAULT_LEAVES_FILE_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Target directory; defaults to the CSV's directory
    pub dir: Option<PathBuf>,
    /// Skip the leaves file above this many entries
    pub leaves_file_limit: usize,
    pub write_proofs: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dir: None,
            leaves_file_limit: DEFAULT_LEAVES_FILE_LIMIT,
            write_proofs: true,
        }
    }
}

/// Paths of the files actually written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub root: PathBuf,
    pub leaves: Option<PathBuf>,
    pub proofs: Option<PathBuf>,
}

pub fn write_outputs(airdrop: &AirdropTree, csv_path: &Path, options: &OutputOptions) -> Result<OutputFiles> {
    let dir = match &options.dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output directory {}", dir.display()))?;
            dir.clone()
        }
        None => csv_path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let base = csv_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "airdrop".to_string());
    let path_for = |suffix: &str| dir.join(format!("{}.{}", base, suffix));

    let root_path = path_for("root");
    fs::write(&root_path, to_hex(&airdrop.root()))
        .with_context(|| format!("failed to write {}", root_path.display()))?;
    log::info!("Merkle root saved to: {}", root_path.display());

    let leaves = if airdrop.len() > options.leaves_file_limit {
        log::info!(
            "Skipping leaves file for large dataset ({} entries)",
            airdrop.len()
        );
        None
    } else {
        let leaves_path = path_for("leaves");
        write_leaves(airdrop, &leaves_path)?;
        log::info!("All leaves saved to: {}", leaves_path.display());
        Some(leaves_path)
    };

    let proofs = if options.write_proofs {
        let proofs_path = path_for("proofs.json");
        let report = airdrop.report()?;
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(&proofs_path, json)
            .with_context(|| format!("failed to write {}", proofs_path.display()))?;
        log::info!("Claim proofs saved to: {}", proofs_path.display());
        Some(proofs_path)
    } else {
        None
    };

    Ok(OutputFiles {
        root: root_path,
        leaves,
        proofs,
    })
}

fn write_leaves(airdrop: &AirdropTree, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(["address", "amount", "leaf"])?;

    for (allocation, leaf) in airdrop.allocations().iter().zip(airdrop.tree().leaves()) {
        writer.write_record([
            address_to_hex(&allocation.address),
            allocation.amount.to_string(),
            to_hex(leaf),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airdrop::{AirdropReport, Allocation};
    use web3::types::{Address, U256};

    fn airdrop(entries: usize) -> AirdropTree {
        let allocations = (1..=entries)
            .map(|i| Allocation::new(Address::repeat_byte(i as u8), U256::from(i as u64 * 100)))
            .collect();
        AirdropTree::new(allocations).unwrap()
    }

    #[test]
    fn test_writes_all_files_next_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("airdrop.csv");
        let airdrop = airdrop(3);

        let files = write_outputs(&airdrop, &csv_path, &OutputOptions::default()).unwrap();

        assert_eq!(files.root, dir.path().join("airdrop.csv.root"));
        assert_eq!(fs::read_to_string(&files.root).unwrap(), to_hex(&airdrop.root()));

        let leaves = fs::read_to_string(files.leaves.unwrap()).unwrap();
        let lines: Vec<&str> = leaves.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "address,amount,leaf");
        assert!(lines[1].starts_with("0x0101010101010101010101010101010101010101,100,0x"));

        let report: AirdropReport =
            serde_json::from_str(&fs::read_to_string(files.proofs.unwrap()).unwrap()).unwrap();
        assert_eq!(report, airdrop.report().unwrap());
    }

    #[test]
    fn test_respects_limits_and_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let options = OutputOptions {
            dir: Some(out.clone()),
            leaves_file_limit: 2,
            write_proofs: false,
        };

        let files = write_outputs(&airdrop(3), Path::new("data/drop.csv"), &options).unwrap();

        assert_eq!(files.root, out.join("drop.csv.root"));
        assert!(files.root.exists());
        assert_eq!(files.leaves, None);
        assert_eq!(files.proofs, None);
    }
}
