// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::{cli, commands::assets, commands::bills, models::NewBill, store::RecordStore};

fn setup() -> RecordStore {
    let store = RecordStore::open_in_memory().unwrap();
    for i in 1..=3 {
        store
            .create_bill(&NewBill {
                date: format!("2025-01-0{}", i),
                category: "P".into(),
                amount: "-10".parse().unwrap(),
                description: None,
                tags: None,
            })
            .unwrap();
    }
    store
}

fn leaf<'a>(m: &'a clap::ArgMatches, path: &[&str]) -> &'a clap::ArgMatches {
    path.iter().fold(m, |acc, name| match acc.subcommand() {
        Some((n, sub)) if n == *name => sub,
        _ => panic!("no {} subcommand", name),
    })
}

#[test]
fn list_range_respected() {
    let store = setup();
    let matches = cli::build_cli().get_matches_from([
        "billfold", "bill", "list", "--from", "2025-01-02", "--to", "2025-01-03",
    ]);
    let rows = bills::query_bills(&store, leaf(&matches, &["bill", "list"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_without_range_returns_everything() {
    let store = setup();
    let matches = cli::build_cli().get_matches_from(["billfold", "bill", "list", "--json"]);
    let rows = bills::query_bills(&store, leaf(&matches, &["bill", "list"])).unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn list_rejects_reversed_range() {
    let store = setup();
    let matches = cli::build_cli().get_matches_from([
        "billfold", "bill", "list", "--from", "2025-01-03", "--to", "2025-01-01",
    ]);
    let err = bills::query_bills(&store, leaf(&matches, &["bill", "list"])).unwrap_err();
    assert!(err.to_string().contains("Start date must be before end date"));
}

#[test]
fn bill_add_accepts_negative_amounts() {
    let store = RecordStore::open_in_memory().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "billfold", "bill", "add", "--date", "2025-04-01", "--category", "Coffee", "--amount",
        "-3.50", "--tags", "daily",
    ]);
    bills::handle(&store, leaf(&matches, &["bill"])).unwrap();
    let all = store.list_bills().unwrap();
    assert_eq!(all[0].amount.to_string(), "-3.50");
    assert_eq!(all[0].tags.as_deref(), Some("daily"));
}

#[test]
fn asset_commands_add_and_set() {
    let store = RecordStore::open_in_memory().unwrap();
    let add = cli::build_cli().get_matches_from([
        "billfold", "asset", "add", "--name", "Brokerage", "--type", "Stock", "--amount", "100",
    ]);
    assets::handle(&store, leaf(&add, &["asset"])).unwrap();
    let id = store.list_assets().unwrap()[0].id;

    let set = cli::build_cli().get_matches_from([
        "billfold",
        "asset",
        "set",
        "--id",
        &id.to_string(),
        "--amount",
        "150.25",
    ]);
    assets::handle(&store, leaf(&set, &["asset"])).unwrap();

    let asset = store.get_asset(id).unwrap().unwrap();
    assert_eq!(asset.r#type, "stock");
    assert_eq!(asset.amount.to_string(), "150.25");
}

#[test]
fn asset_add_rejects_unknown_type() {
    let store = RecordStore::open_in_memory().unwrap();
    let add = cli::build_cli().get_matches_from([
        "billfold", "asset", "add", "--name", "Car", "--type", "vehicle", "--amount", "1",
    ]);
    let err = assets::handle(&store, leaf(&add, &["asset"])).unwrap_err();
    assert!(err.to_string().contains("Unknown asset type"));
    assert!(store.list_assets().unwrap().is_empty());
}
