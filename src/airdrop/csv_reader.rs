//! Allocation CSV reader
//!
//! Expected layout: a header row, then `address,amount` rows. Extra columns
//! are ignored. Malformed rows are skipped with a warning.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::Allocation;
use crate::utils::{parse_address, parse_amount};

/// Read allocations from a CSV file
pub fn read_allocations(path: &Path) -> Result<Vec<Allocation>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open CSV file {}", path.display()))?;
    read_allocations_from(file).with_context(|| format!("failed to read {}", path.display()))
}

/// Read allocations from any CSV source
pub fn read_allocations_from<R: Read>(source: R) -> Result<Vec<Allocation>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut allocations = Vec::new();
    let mut total_rows = 0usize;

    for (i, record) in reader.records().enumerate() {
        let record = record.context("malformed CSV")?;
        total_rows += 1;
        // 1-based file line, counting the header
        let row = i + 2;

        if let Some(allocation) = parse_row(&record, row) {
            allocations.push(allocation);
        }
    }

    if total_rows == 0 {
        bail!("CSV file must have at least a header and one data row");
    }
    if allocations.is_empty() {
        bail!("no valid entries found in CSV file");
    }

    log::info!(
        "Processed {} valid entries out of {} total rows",
        allocations.len(),
        total_rows
    );
    Ok(allocations)
}

fn parse_row(record: &csv::StringRecord, row: usize) -> Option<Allocation> {
    let (Some(raw_address), Some(raw_amount)) = (record.get(0), record.get(1)) else {
        log::warn!("Skipping row {} (insufficient columns)", row);
        return None;
    };

    let address = match parse_address(raw_address) {
        Ok(address) if !address.is_zero() => address,
        _ => {
            log::warn!("Skipping row {} (invalid address: {})", row, raw_address);
            return None;
        }
    };

    let amount = match parse_amount(raw_amount) {
        Ok(amount) => amount,
        Err(e) => {
            log::warn!("Skipping row {} (invalid amount: {}): {}", row, raw_amount, e);
            return None;
        }
    };

    Some(Allocation::new(address, amount))
}
