// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use billfold::{cli, commands, config::Config, server, store::RecordStore, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing().ok();

    let cli = cli::build_cli();
    let matches = cli.get_matches();
    let config = Config::from_matches(&matches)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            RecordStore::open(&config.db_path)?;
            println!("Database initialized at {}", config.db_path.display());
        }
        Some(("serve", _)) => server::run_server(&config).await?,
        Some(("bill", sub)) => {
            let store = RecordStore::open(&config.db_path)?;
            commands::bills::handle(&store, sub)?;
        }
        Some(("asset", sub)) => {
            let store = RecordStore::open(&config.db_path)?;
            commands::assets::handle(&store, sub)?;
        }
        Some(("logs", sub)) => commands::logs::handle(&config.log_path, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
