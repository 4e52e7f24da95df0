// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable storage for bills and assets.
//!
//! Every operation takes the connection lock, runs one statement (or one
//! transaction for batch imports) and releases it. SQLite itself arbitrates
//! between processes sharing the file.

use crate::db;
use crate::models::{Asset, Bill, NewAsset, NewBill, WriteResult};
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create data directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open database at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database connection lock poisoned")]
    Poisoned,
}

const BILL_COLUMNS: &str = "id, date, category, amount, description, tags, created_at";
const ASSET_COLUMNS: &str = "id, name, type, amount, last_updated";

/// Handle to the bills/assets database. Cheap to clone; clones share one connection.
#[derive(Clone)]
pub struct RecordStore {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl RecordStore {
    /// Open (creating if needed) the database file and apply the schema.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = db::open(&path).map_err(|source| StoreError::Open {
            path: path.clone(),
            source,
        })?;
        debug!("Opened record store at {}", path.display());
        Ok(Self::from_connection(conn, path))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self::from_connection(conn, PathBuf::from(":memory:")))
    }

    fn from_connection(conn: Connection, path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    // Bills

    pub fn create_bill(&self, bill: &NewBill) -> StoreResult<WriteResult> {
        let conn = self.conn()?;
        let changed = insert_bill(&conn, bill)?;
        let id = conn.last_insert_rowid();
        debug!("Recorded bill {} on {} ({})", id, bill.date, bill.category);
        Ok(WriteResult::inserted(id, changed))
    }

    /// Insert a batch atomically; either every bill lands or none does.
    pub fn import_bills(&self, bills: &[NewBill]) -> StoreResult<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut count = 0;
        for bill in bills {
            count += insert_bill(&tx, bill)?;
        }
        tx.commit()?;
        debug!("Imported {} bills", count);
        Ok(count)
    }

    /// All bills, newest date first. Same-day bills come newest insert first.
    pub fn list_bills(&self) -> StoreResult<Vec<Bill>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {BILL_COLUMNS} FROM bills ORDER BY date DESC, id DESC"
        ))?;
        let bills = stmt
            .query_map([], bill_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bills)
    }

    /// Bills with `start <= date <= end`, compared as `YYYY-MM-DD` strings.
    /// Reversed bounds match nothing.
    pub fn list_bills_by_date_range(&self, start: &str, end: &str) -> StoreResult<Vec<Bill>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE date BETWEEN ?1 AND ?2 ORDER BY date DESC, id DESC"
        ))?;
        let bills = stmt
            .query_map(params![start, end], bill_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bills)
    }

    // Assets

    pub fn create_asset(&self, asset: &NewAsset) -> StoreResult<WriteResult> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "INSERT INTO assets(name, type, amount) VALUES (?1, ?2, ?3)",
            params![asset.name, asset.r#type, asset.amount.to_string()],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Added asset {} '{}' ({})", id, asset.name, asset.r#type);
        Ok(WriteResult::inserted(id, changed))
    }

    pub fn list_assets(&self) -> StoreResult<Vec<Asset>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets ORDER BY last_updated DESC, id DESC"
        ))?;
        let assets = stmt
            .query_map([], asset_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(assets)
    }

    pub fn get_asset(&self, id: i64) -> StoreResult<Option<Asset>> {
        let conn = self.conn()?;
        let asset = conn
            .query_row(
                &format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id=?1"),
                params![id],
                asset_from_row,
            )
            .optional()?;
        Ok(asset)
    }

    /// Set a new amount and refresh `last_updated`. An unknown id changes nothing
    /// and reports zero rows.
    pub fn update_asset_amount(&self, id: i64, amount: Decimal) -> StoreResult<WriteResult> {
        let conn = self.conn()?;
        let changed = conn.execute(
            &format!("UPDATE assets SET amount=?1, last_updated={} WHERE id=?2", db::NOW_EXPR),
            params![amount.to_string(), id],
        )?;
        debug!("Asset {} amount -> {} ({} rows)", id, amount, changed);
        Ok(WriteResult::updated(changed))
    }
}

fn insert_bill(conn: &Connection, bill: &NewBill) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO bills(date, category, amount, description, tags) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            bill.date,
            bill.category,
            bill.amount.to_string(),
            bill.description,
            bill.tags
        ],
    )
}

fn bill_from_row(r: &Row<'_>) -> rusqlite::Result<Bill> {
    Ok(Bill {
        id: r.get(0)?,
        date: r.get(1)?,
        category: r.get(2)?,
        amount: decimal_column(r, 3)?,
        description: r.get(4)?,
        tags: r.get(5)?,
        created_at: r.get(6)?,
    })
}

fn asset_from_row(r: &Row<'_>) -> rusqlite::Result<Asset> {
    Ok(Asset {
        id: r.get(0)?,
        name: r.get(1)?,
        r#type: r.get(2)?,
        amount: decimal_column(r, 3)?,
        last_updated: r.get(4)?,
    })
}

// Amounts are written as TEXT, but databases created by older builds hold REAL.
fn decimal_column(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let conversion = |e: rust_decimal::Error, ty: Type| {
        rusqlite::Error::FromSqlConversionFailure(idx, ty, Box::new(e))
    };
    match r.get_ref(idx)? {
        ValueRef::Text(raw) => {
            let s = std::str::from_utf8(raw).map_err(rusqlite::Error::Utf8Error)?;
            s.trim()
                .parse::<Decimal>()
                .map_err(|e| conversion(e, Type::Text))
        }
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Real(f) => Decimal::try_from(f).map_err(|e| conversion(e, Type::Real)),
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "amount".into(),
            other.data_type(),
        )),
    }
}
