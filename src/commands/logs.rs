// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::logs::{LogScan, query_logs};
use crate::utils::{maybe_print_json, pretty_table};
use crate::validation::LogQueryParams;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

pub fn handle(log_path: &Path, sub: &clap::ArgMatches) -> Result<()> {
    let scan = run_query(log_path, sub)?;
    if !scan.skipped.is_empty() {
        warn!("Skipped {} malformed log lines", scan.skipped.len());
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &scan.entries)? {
        let rows = scan
            .entries
            .iter()
            .map(|e| {
                vec![
                    e.timestamp_raw().unwrap_or_default().to_string(),
                    e.level().unwrap_or_default().to_string(),
                    e.message().unwrap_or_default().to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Timestamp", "Level", "Message"], rows));
    }
    Ok(())
}

pub fn run_query(log_path: &Path, sub: &clap::ArgMatches) -> Result<LogScan> {
    let query = LogQueryParams {
        level: sub.get_one::<String>("level").cloned(),
        start_date: sub.get_one::<String>("from").cloned(),
        end_date: sub.get_one::<String>("to").cloned(),
    }
    .into_query();
    query_logs(log_path, &query).with_context(|| format!("Query {}", log_path.display()))
}
