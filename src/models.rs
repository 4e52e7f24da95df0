// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub date: String, // YYYY-MM-DD
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: Option<String>,
    pub tags: Option<String>, // comma-joined
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub date: String,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub r#type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub name: String,
    pub r#type: String,
    pub amount: Decimal,
}

/// Row-effect report for a write. `id` is the inserted rowid; updates leave it empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub rows_affected: usize,
}

impl WriteResult {
    pub fn inserted(id: i64, rows_affected: usize) -> Self {
        Self {
            id: Some(id),
            rows_affected,
        }
    }

    pub fn updated(rows_affected: usize) -> Self {
        Self {
            id: None,
            rows_affected,
        }
    }
}

/// Asset kinds the validation layer accepts. The store itself takes any string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Cash,
    Stock,
    Fund,
    Property,
    Other,
}

impl AssetKind {
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Cash,
        AssetKind::Stock,
        AssetKind::Fund,
        AssetKind::Property,
        AssetKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Cash => "cash",
            AssetKind::Stock => "stock",
            AssetKind::Fund => "fund",
            AssetKind::Property => "property",
            AssetKind::Other => "other",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown asset type '{}' (use cash|stock|fund|property|other)",
                    s
                )
            })
    }
}
