// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// SQLite expression for "now" with millisecond precision. Sorts lexically.
pub const NOW_EXPR: &str = "strftime('%Y-%m-%d %H:%M:%f', 'now')";

pub fn open(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(Duration::from_secs(5))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

const BILLS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS bills(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        description TEXT,
        tags TEXT,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
    );
"#;

const ASSETS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS assets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        type TEXT NOT NULL,
        amount TEXT NOT NULL,
        last_updated TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
    );
"#;

const BILLS_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_bills_date ON bills(date);";

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(BILLS_TABLE)?;
    conn.execute_batch(ASSETS_TABLE)?;
    migrate_real_amounts(conn)?;
    conn.execute_batch(BILLS_INDEX)?;
    Ok(())
}

/// Older databases declared `amount REAL`. REAL affinity turns every TEXT
/// amount back into a float on insert, so those tables are rebuilt once with a
/// TEXT column.
fn migrate_real_amounts(conn: &Connection) -> rusqlite::Result<()> {
    if column_type(conn, "bills", "amount")?.eq_ignore_ascii_case("REAL") {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch("ALTER TABLE bills RENAME TO bills_legacy;")?;
        tx.execute_batch(BILLS_TABLE)?;
        tx.execute_batch(&format!(
            "INSERT INTO bills(id, date, category, amount, description, tags, created_at)
             SELECT id, date, category, CAST(amount AS TEXT), description, tags,
                    COALESCE(created_at, {NOW_EXPR})
             FROM bills_legacy;
             DROP TABLE bills_legacy;"
        ))?;
        tx.commit()?;
        info!("Migrated bills.amount from REAL to TEXT");
    }
    if column_type(conn, "assets", "amount")?.eq_ignore_ascii_case("REAL") {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch("ALTER TABLE assets RENAME TO assets_legacy;")?;
        tx.execute_batch(ASSETS_TABLE)?;
        tx.execute_batch(&format!(
            "INSERT INTO assets(id, name, type, amount, last_updated)
             SELECT id, name, type, CAST(amount AS TEXT),
                    COALESCE(last_updated, {NOW_EXPR})
             FROM assets_legacy;
             DROP TABLE assets_legacy;"
        ))?;
        tx.commit()?;
        info!("Migrated assets.amount from REAL to TEXT");
    }
    Ok(())
}

/// Declared type of `table.column`, empty when the column is missing.
pub fn column_type(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<String> {
    conn.query_row(
        "SELECT type FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |r| r.get(0),
    )
    .optional()
    .map(Option::unwrap_or_default)
}
