// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Billfold", "billfold"));

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

pub fn default_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("billfold.sqlite"))
}

pub fn default_log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("logs").join("combined.log"))
}

/// Runtime settings, resolved from CLI flags, their environment fallbacks and
/// platform defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub bind: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Config {
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let db_path = match m.get_one::<String>("db") {
            Some(p) => PathBuf::from(p.trim()),
            None => default_db_path()?,
        };
        let log_path = match lookup::<String>(m, "log-file") {
            Some(p) => PathBuf::from(p.trim()),
            None => default_log_path()?,
        };
        Ok(Self {
            db_path,
            log_path,
            bind: lookup::<String>(m, "bind").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port: lookup::<u16>(m, "port").unwrap_or(DEFAULT_PORT),
            timeout: Duration::from_secs(lookup::<u64>(m, "timeout").unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.bind, self.port))
    }
}

// Flags live on different subcommands; look in the leaf that was invoked.
fn lookup<T: Clone + Send + Sync + 'static>(m: &clap::ArgMatches, id: &str) -> Option<T> {
    if let Ok(Some(v)) = m.try_get_one::<T>(id) {
        return Some(v.clone());
    }
    m.subcommand()
        .and_then(|(_, sub)| lookup::<T>(sub, id))
}
