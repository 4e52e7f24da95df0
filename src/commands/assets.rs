// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::RecordStore;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use crate::validation::{CreateAssetRequest, UpdateAssetRequest};
use anyhow::Result;

pub fn handle(store: &RecordStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let asset = CreateAssetRequest {
                name: sub.get_one::<String>("name").cloned(),
                r#type: sub.get_one::<String>("type").map(|s| s.trim().to_lowercase()),
                amount: Some(parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?),
            }
            .validate()?;
            let res = store.create_asset(&asset)?;
            println!(
                "Added asset #{} '{}' ({}, {})",
                res.id.unwrap_or_default(),
                asset.name,
                asset.r#type,
                asset.amount
            );
        }
        Some(("list", sub)) => {
            let assets = store.list_assets()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &assets)? {
                let rows = assets
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.r#type.clone(),
                            a.amount.to_string(),
                            a.last_updated.format("%Y-%m-%d %H:%M:%S").to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Type", "Amount", "Updated"], rows)
                );
            }
        }
        Some(("set", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let amount = UpdateAssetRequest {
                amount: Some(parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?),
            }
            .validate()?;
            let res = store.update_asset_amount(id, amount)?;
            if res.rows_affected == 0 {
                println!("No asset with id {}; nothing changed", id);
            } else {
                println!("Asset #{} amount set to {}", id, amount);
            }
        }
        _ => {}
    }
    Ok(())
}
