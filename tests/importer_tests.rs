// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::{cli, commands::bills, commands::importer, store::RecordStore};
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn importer_trims_cli_path_argument() {
    let store = RecordStore::open_in_memory().unwrap();
    let file = csv_file(
        "date,category,amount,description,tags\n2025-02-03,Shop,-5.00,,\n2025-02-04,Salary,2500,Feb,income\n",
    );

    let path = file.path().to_str().unwrap().to_string();
    let padded = format!("  {}  ", path);
    let matches =
        cli::build_cli().get_matches_from(["billfold", "bill", "import", "--path", &padded]);
    if let Some(("bill", bill_m)) = matches.subcommand() {
        bills::handle(&store, bill_m).unwrap();
    } else {
        panic!("no bill subcommand");
    }

    let all = store.list_bills().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].category, "Salary");
    assert_eq!(all[0].description.as_deref(), Some("Feb"));
    assert_eq!(all[0].tags.as_deref(), Some("income"));
    assert_eq!(all[1].amount.to_string(), "-5.00");
    assert_eq!(all[1].description, None);
}

#[test]
fn importer_accepts_rows_without_optional_columns() {
    let store = RecordStore::open_in_memory().unwrap();
    let file = csv_file("date,category,amount\n2025-03-01,Rent,-900\n");
    let n = importer::import_bills(&store, file.path()).unwrap();
    assert_eq!(n, 1);
}

#[test]
fn importer_rejects_whole_file_on_bad_row() {
    let store = RecordStore::open_in_memory().unwrap();
    let file = csv_file(
        "date,category,amount,description,tags\n2025-02-03,Shop,-5.00,,\n03/02/2025,Shop,-7,,\n",
    );

    let err = importer::import_bills(&store, file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("line 3"));
    assert!(store.list_bills().unwrap().is_empty());
}

#[test]
fn importer_reports_bad_amount() {
    let store = RecordStore::open_in_memory().unwrap();
    let file = csv_file("date,category,amount\n2025-02-03,Shop,lots\n");
    let err = importer::import_bills(&store, file.path()).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("Invalid amount on line 2"));
    assert!(msg.contains("Invalid decimal 'lots'"));
}
