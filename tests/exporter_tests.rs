// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::{cli, commands::bills, commands::exporter, models::NewBill, store::RecordStore};
use serde_json::Value;
use tempfile::tempdir;

fn seeded() -> RecordStore {
    let store = RecordStore::open_in_memory().unwrap();
    store
        .create_bill(&NewBill {
            date: "2025-01-02".into(),
            category: "Groceries".into(),
            amount: "-12.34".parse().unwrap(),
            description: Some("Weekly run".into()),
            tags: Some("food".into()),
        })
        .unwrap();
    store
        .create_bill(&NewBill {
            date: "2025-01-01".into(),
            category: "Salary".into(),
            amount: "2500".parse().unwrap(),
            description: None,
            tags: None,
        })
        .unwrap();
    store
}

#[test]
fn export_bills_writes_pretty_json_oldest_first() {
    let store = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "billfold", "bill", "export", "--format", "json", "--out", &out_str,
    ]);
    if let Some(("bill", bill_m)) = matches.subcommand() {
        bills::handle(&store, bill_m).unwrap();
    } else {
        panic!("no bill subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: Value = serde_json::from_str(&contents).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["category"], "Salary");
    assert_eq!(arr[1]["category"], "Groceries");
    assert_eq!(arr[1]["amount"].as_f64(), Some(-12.34));
    assert_eq!(arr[1]["description"], "Weekly run");
}

#[test]
fn export_bills_writes_csv_that_imports_back() {
    let store = seeded();
    let dir = tempdir().unwrap();
    let out = dir.path().join("bills.csv");
    let n = exporter::export_bills(&store, "csv", &out).unwrap();
    assert_eq!(n, 2);

    let contents = std::fs::read_to_string(&out).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("date,category,amount,description,tags"));
    assert_eq!(lines.next(), Some("2025-01-01,Salary,2500,,"));
    assert_eq!(lines.next(), Some("2025-01-02,Groceries,-12.34,Weekly run,food"));
}

#[test]
fn export_rejects_unknown_format() {
    let store = seeded();
    let dir = tempdir().unwrap();
    let err = exporter::export_bills(&store, "xml", &dir.path().join("x")).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
}
