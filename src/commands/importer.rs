// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::NewBill;
use crate::store::RecordStore;
use crate::utils::parse_decimal;
use crate::validation::CreateBillRequest;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::info;

pub fn handle(store: &RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let count = import_bills(store, Path::new(path))?;
    println!("Imported {} bills from {}", count, path);
    Ok(())
}

/// Read `date,category,amount,description,tags` rows and insert them in one
/// transaction. Any bad row aborts the whole file.
pub fn import_bills(store: &RecordStore, path: &Path) -> Result<usize> {
    let bills = read_bills(path)?;
    let count = store.import_bills(&bills)?;
    info!("Imported {} bills from {}", count, path.display());
    Ok(count)
}

fn read_bills(path: &Path) -> Result<Vec<NewBill>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;

    let mut bills = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let rec = result.with_context(|| format!("Read CSV line {}", line))?;
        let field = |i: usize| {
            rec.get(i)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };
        let amount = match field(2) {
            Some(raw) => Some(
                parse_decimal(&raw).with_context(|| format!("Invalid amount on line {}", line))?,
            ),
            None => None,
        };
        let bill = CreateBillRequest {
            date: field(0),
            category: field(1),
            amount,
            description: field(3),
            tags: field(4),
        }
        .validate()
        .with_context(|| format!("Invalid bill on line {}", line))?;
        bills.push(bill);
    }
    Ok(bills)
}
