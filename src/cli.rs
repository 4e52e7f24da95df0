// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as a JSON array"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn log_file_arg() -> Arg {
    Arg::new("log-file")
        .long("log-file")
        .env("BILLFOLD_LOG_FILE")
        .help("JSON-lines log file (default: <data dir>/logs/combined.log)")
}

pub fn build_cli() -> Command {
    command!()
        .name("billfold")
        .about("Track bills and assets; serve them over HTTP")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("BILLFOLD_DB")
                .help("SQLite database file (default: <data dir>/billfold.sqlite)"),
        )
        .subcommand(Command::new("init").about("Create or migrate the database"))
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP API")
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .env("BILLFOLD_BIND")
                        .help("Bind address (default 127.0.0.1)"),
                )
                .arg(
                    Arg::new("port")
                        .long("port")
                        .short('p')
                        .env("PORT")
                        .value_parser(value_parser!(u16))
                        .help("Port (default 3000)"),
                )
                .arg(log_file_arg())
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .env("BILLFOLD_TIMEOUT")
                        .value_parser(value_parser!(u64))
                        .help("Request timeout in seconds (default 30)"),
                ),
        )
        .subcommand(
            Command::new("bill")
                .about("Record and list bills")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("tags").long("tags").help("Comma-separated tags")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("from").long("from").requires("to"))
                        .arg(Arg::new("to").long("to").requires("from")),
                ))
                .subcommand(
                    Command::new("import").arg(
                        Arg::new("path")
                            .long("path")
                            .required(true)
                            .help("CSV with header: date,category,amount,description,tags"),
                    ),
                )
                .subcommand(
                    Command::new("export")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("asset")
                .about("Manage asset holdings")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("cash|stock|fund|property|other"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("set")
                        .about("Set the current amount of an asset")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(json_flags(
            Command::new("logs")
                .about("Query the JSON-lines log file")
                .arg(Arg::new("level").long("level"))
                .arg(Arg::new("from").long("from").help("Start instant (inclusive)"))
                .arg(Arg::new("to").long("to").help("End instant (inclusive)"))
                .arg(log_file_arg()),
        ))
}
