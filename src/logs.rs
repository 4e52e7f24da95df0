// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reading and appending the JSON-lines application log.
//!
//! The log file holds one JSON object per line. Queries re-read the whole file
//! on every call; lines that fail to decode are skipped and reported in
//! [`LogScan::skipped`].

use crate::utils::parse_instant;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Log file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("No permission to read log file {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read log file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LogError {
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            ErrorKind::NotFound => LogError::NotFound { path },
            ErrorKind::PermissionDenied => LogError::PermissionDenied { path },
            _ => LogError::Io { path, source: err },
        }
    }
}

/// A single line that could not be decoded.
#[derive(Debug, Error)]
#[error("line {line}: {reason}")]
pub struct DecodeError {
    pub line: usize,
    pub reason: String,
}

/// One decoded log record. Every field of the source object is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry(Map<String, Value>);

impl LogEntry {
    pub fn level(&self) -> Option<&str> {
        self.0.get("level").and_then(Value::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    pub fn timestamp_raw(&self) -> Option<&str> {
        self.0.get("timestamp").and_then(Value::as_str)
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp_raw().and_then(parse_instant)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub level: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl LogQuery {
    // The range only applies when both ends are given.
    fn range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.start.zip(self.end)
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(level) = &self.level {
            if entry.level() != Some(level.as_str()) {
                return false;
            }
        }
        if let Some((start, end)) = self.range() {
            return match entry.timestamp() {
                Some(ts) => start <= ts && ts <= end,
                None => false,
            };
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

impl From<DecodeError> for SkippedLine {
    fn from(e: DecodeError) -> Self {
        SkippedLine {
            line: e.line,
            reason: e.reason,
        }
    }
}

/// Matching entries in file order, plus the lines that failed to decode.
#[derive(Debug, Clone, Default)]
pub struct LogScan {
    pub entries: Vec<LogEntry>,
    pub skipped: Vec<SkippedLine>,
}

/// Decode each non-blank line of `text`. Line numbers are 1-based.
pub fn decode_lines(text: &str) -> impl Iterator<Item = Result<LogEntry, DecodeError>> + '_ {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<LogEntry>(line).map_err(|e| DecodeError {
                line: idx + 1,
                reason: e.to_string(),
            })
        })
}

/// Filter already-loaded log text.
pub fn scan(text: &str, query: &LogQuery) -> LogScan {
    let mut out = LogScan::default();
    for decoded in decode_lines(text) {
        match decoded {
            Ok(entry) => {
                if query.matches(&entry) {
                    out.entries.push(entry);
                }
            }
            Err(e) => {
                warn!("Failed to parse log line {}: {}", e.line, e.reason);
                out.skipped.push(e.into());
            }
        }
    }
    out
}

/// Read the log file at `path` and return the entries matching `query`.
pub fn query_logs(path: &Path, query: &LogQuery) -> Result<LogScan, LogError> {
    let meta = fs::metadata(path).map_err(|e| LogError::from_io(path, e))?;
    if meta.is_dir() {
        return Err(LogError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("log path is a directory"),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| LogError::from_io(path, e))?;
    Ok(scan(&text, query))
}

/// A record submitted for the log file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogRecord {
    pub level: Option<String>,
    pub message: Option<String>,
    pub details: Option<Value>,
    pub timestamp: Option<String>,
}

impl LogRecord {
    fn into_line(self) -> serde_json::Result<String> {
        let mut obj = Map::new();
        obj.insert(
            "level".into(),
            Value::String(
                self.level
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| "info".into()),
            ),
        );
        obj.insert("message".into(), Value::String(self.message.unwrap_or_default()));
        if let Some(details) = self.details.filter(|d| !d.is_null()) {
            obj.insert("details".into(), details);
        }
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        obj.insert("timestamp".into(), Value::String(timestamp));
        let mut line = serde_json::to_string(&Value::Object(obj))?;
        line.push('\n');
        Ok(line)
    }
}

/// Appends records to the log file that [`query_logs`] reads.
#[derive(Debug, Clone)]
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: LogRecord) -> io::Result<()> {
        let line = record.into_line().map_err(io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // One write per record so concurrent appenders never interleave inside a line.
        file.write_all(line.as_bytes())
    }
}
