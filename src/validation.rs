// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input checks that run before anything reaches the store.

use crate::logs::LogQuery;
use crate::models::{AssetKind, NewAsset, NewBill};
use crate::utils::{parse_date, parse_instant};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    Missing(&'static str),

    #[error("Invalid date format: '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Start date must be before end date")]
    ReversedRange,

    #[error("{0}")]
    InvalidType(String),

    #[error("Amount must be a positive number")]
    NegativeAmount,

    #[error("{0}")]
    Malformed(String),
}

fn present(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn checked_date(s: &str) -> Result<(), ValidationError> {
    parse_date(s)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBillRequest {
    pub date: Option<String>,
    pub category: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub tags: Option<String>,
}

impl CreateBillRequest {
    pub fn validate(self) -> Result<NewBill, ValidationError> {
        const REQUIRED: &str = "Date, category and amount are required";
        let date = present(self.date).ok_or(ValidationError::Missing(REQUIRED))?;
        let category = present(self.category).ok_or(ValidationError::Missing(REQUIRED))?;
        let amount = self.amount.ok_or(ValidationError::Missing(REQUIRED))?;
        checked_date(&date)?;
        Ok(NewBill {
            date,
            category,
            amount,
            description: present(self.description),
            tags: present(self.tags),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAssetRequest {
    pub name: Option<String>,
    pub r#type: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
}

impl CreateAssetRequest {
    pub fn validate(self) -> Result<NewAsset, ValidationError> {
        const REQUIRED: &str = "Name, type and amount are required";
        let name = present(self.name).ok_or(ValidationError::Missing(REQUIRED))?;
        let typ = present(self.r#type).ok_or(ValidationError::Missing(REQUIRED))?;
        let amount = self.amount.ok_or(ValidationError::Missing(REQUIRED))?;
        let kind = typ
            .parse::<AssetKind>()
            .map_err(ValidationError::InvalidType)?;
        Ok(NewAsset {
            name,
            r#type: kind.to_string(),
            amount: non_negative(amount)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssetRequest {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
}

impl UpdateAssetRequest {
    pub fn validate(self) -> Result<Decimal, ValidationError> {
        let amount = self
            .amount
            .ok_or(ValidationError::Missing("Amount is required"))?;
        non_negative(amount)
    }
}

fn non_negative(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(amount)
}

/// `startDate`/`endDate` query parameters for the bill range read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeParams {
    pub fn validate(self) -> Result<(String, String), ValidationError> {
        const REQUIRED: &str = "Start date and end date are required";
        let start = present(self.start_date).ok_or(ValidationError::Missing(REQUIRED))?;
        let end = present(self.end_date).ok_or(ValidationError::Missing(REQUIRED))?;
        checked_date(&start)?;
        checked_date(&end)?;
        if start > end {
            return Err(ValidationError::ReversedRange);
        }
        Ok((start, end))
    }
}

/// `level`/`startDate`/`endDate` query parameters for the log viewer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQueryParams {
    pub level: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl LogQueryParams {
    /// Never fails: a bound that does not parse is dropped, which leaves the
    /// time range inactive. Reversed bounds simply match nothing.
    pub fn into_query(self) -> LogQuery {
        let instant = |raw: Option<String>| {
            present(raw).and_then(|s| {
                let parsed = parse_instant(&s);
                if parsed.is_none() {
                    warn!("Ignoring unparseable log bound '{}'", s);
                }
                parsed
            })
        };
        LogQuery {
            level: present(self.level),
            start: instant(self.start_date),
            end: instant(self.end_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_request_requires_date_category_amount() {
        let err = CreateBillRequest {
            date: Some("2024-01-01".into()),
            category: Some("  ".into()),
            amount: Some(Decimal::from(5)),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::Missing("Date, category and amount are required"));
    }

    #[test]
    fn bill_request_allows_negative_amounts() {
        let bill = CreateBillRequest {
            date: Some("2024-01-01".into()),
            category: Some("Refund".into()),
            amount: Some(Decimal::from(-20)),
            tags: Some("".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(bill.amount, Decimal::from(-20));
        assert_eq!(bill.tags, None);
    }

    #[test]
    fn asset_request_checks_kind_and_sign() {
        let bad_kind = CreateAssetRequest {
            name: Some("Car".into()),
            r#type: Some("vehicle".into()),
            amount: Some(Decimal::from(1)),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(bad_kind, ValidationError::InvalidType(_)));

        let negative = CreateAssetRequest {
            name: Some("Wallet".into()),
            r#type: Some("cash".into()),
            amount: Some(Decimal::from(-1)),
        }
        .validate()
        .unwrap_err();
        assert_eq!(negative, ValidationError::NegativeAmount);
    }

    #[test]
    fn update_accepts_zero() {
        let amount = UpdateAssetRequest {
            amount: Some(Decimal::ZERO),
        }
        .validate()
        .unwrap();
        assert!(amount.is_zero());
    }

    #[test]
    fn date_range_rejects_reversed_and_malformed() {
        let reversed = DateRangeParams {
            start_date: Some("2024-02-01".into()),
            end_date: Some("2024-01-01".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(reversed, ValidationError::ReversedRange);

        let malformed = DateRangeParams {
            start_date: Some("2024/01/01".into()),
            end_date: Some("2024-01-31".into()),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(malformed, ValidationError::InvalidDate(_)));
    }

    #[test]
    fn log_params_parse_bounds() {
        let q = LogQueryParams {
            level: Some("error".into()),
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-02T12:00:00Z".into()),
        }
        .into_query();
        assert_eq!(q.level.as_deref(), Some("error"));
        assert!(q.start.is_some() && q.end.is_some());
    }

    #[test]
    fn log_params_drop_unparseable_bounds() {
        let q = LogQueryParams {
            start_date: Some("soon".into()),
            end_date: Some("2024-01-02".into()),
            ..Default::default()
        }
        .into_query();
        assert!(q.start.is_none());
        assert!(q.end.is_some());
    }

    #[test]
    fn log_params_keep_reversed_bounds() {
        let q = LogQueryParams {
            start_date: Some("2024-01-03".into()),
            end_date: Some("2024-01-01".into()),
            ..Default::default()
        }
        .into_query();
        assert!(q.start > q.end);
    }
}
