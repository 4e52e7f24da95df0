// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{exporter, importer};
use crate::models::Bill;
use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use crate::validation::{CreateBillRequest, DateRangeParams};
use anyhow::Result;

pub fn handle(store: &RecordStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("import", sub)) => importer::handle(store, sub)?,
        Some(("export", sub)) => exporter::handle(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let amount = match sub.get_one::<String>("amount") {
        Some(raw) => Some(parse_decimal(raw.trim())?),
        None => None,
    };
    let bill = CreateBillRequest {
        date: sub.get_one::<String>("date").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        amount,
        description: sub.get_one::<String>("description").cloned(),
        tags: sub.get_one::<String>("tags").cloned(),
    }
    .validate()?;
    let res = store.create_bill(&bill)?;
    println!(
        "Recorded bill #{} {} on {} ({})",
        res.id.unwrap_or_default(),
        bill.amount,
        bill.date,
        bill.category
    );
    Ok(())
}

fn list(store: &RecordStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_bills(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.date.clone(),
                    b.category.clone(),
                    b.amount.to_string(),
                    b.description.clone().unwrap_or_default(),
                    b.tags.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Category", "Amount", "Description", "Tags"],
                rows,
            )
        );
    }
    Ok(())
}

/// Bills for `bill list`, narrowed to `--from/--to` when both are given.
pub fn query_bills(store: &RecordStore, sub: &clap::ArgMatches) -> Result<Vec<Bill>> {
    let from = sub.get_one::<String>("from").cloned();
    let to = sub.get_one::<String>("to").cloned();
    if from.is_none() && to.is_none() {
        return Ok(store.list_bills()?);
    }
    let (start, end) = DateRangeParams {
        start_date: from,
        end_date: to,
    }
    .validate()?;
    Ok(store.list_bills_by_date_range(&start, &end)?)
}
