// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::RecordStore;
use anyhow::{Result, bail};
use std::path::Path;

pub fn handle(store: &RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let count = export_bills(store, &fmt, Path::new(out))?;
    println!("Exported {} bills to {}", count, out);
    Ok(())
}

/// Write every bill, oldest first, as `csv` or `json`.
pub fn export_bills(store: &RecordStore, fmt: &str, out: &Path) -> Result<usize> {
    let mut bills = store.list_bills()?;
    bills.reverse();

    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "category", "amount", "description", "tags"])?;
            for b in &bills {
                let amount = b.amount.to_string();
                wtr.write_record([
                    b.date.as_str(),
                    b.category.as_str(),
                    amount.as_str(),
                    b.description.as_deref().unwrap_or_default(),
                    b.tags.as_deref().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&bills)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(bills.len())
}
