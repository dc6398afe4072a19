// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("start")
            .long("start")
            .value_name("YYYY-MM-DD")
            .help("Include entries on or after this date"),
    )
    .arg(
        Arg::new("end")
            .long("end")
            .value_name("YYYY-MM-DD")
            .help("Include entries on or before this date"),
    )
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn entry_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("date").long("date").required(true).value_name("YYYY-MM-DD"))
        .arg(
            Arg::new("type")
                .long("type")
                .required(true)
                .value_parser(["income", "expense"]),
        )
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(Arg::new("description").long("description"))
        .arg(
            Arg::new("item")
                .long("item")
                .help("Fruit or product name"),
        )
        .arg(Arg::new("quantity").long("quantity"))
        .arg(Arg::new("price").long("price").help("Price per unit"))
        .arg(
            Arg::new("payment")
                .long("payment")
                .value_parser(["cash", "digital"])
                .default_value("cash"),
        )
}

pub fn build_cli() -> Command {
    Command::new("shopbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Income/expense ledger with daily analytics and CSV/PDF reports")
        .subcommand(Command::new("init").about("Create the ledger database"))
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(entry_args(Command::new("add").about("Record a transaction")))
                .subcommand(json_args(range_args(
                    Command::new("list").about("List transactions, newest first").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )))
                .subcommand(entry_args(
                    Command::new("edit").about("Replace a transaction").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ))
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("clear").about("Delete every transaction").arg(
                        Arg::new("yes")
                            .long("yes")
                            .action(ArgAction::SetTrue)
                            .help("Confirm deleting all transactions"),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Analytics over the ledger")
                .subcommand(json_args(range_args(
                    Command::new("summary").about("Totals and daily averages"),
                )))
                .subcommand(json_args(range_args(
                    Command::new("daily").about("Per-day income, expense and profit"),
                )))
                .subcommand(range_args(
                    Command::new("charts")
                        .about("Render daily and payment-method charts as SVG")
                        .arg(Arg::new("out").long("out").required(true).value_name("DIR"))
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .action(ArgAction::SetTrue)
                                .help("Also print the charts as base64 JSON"),
                        ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write CSV or PDF reports")
                .subcommand(range_args(
                    Command::new("csv")
                        .about("Export transactions as CSV")
                        .arg(Arg::new("out").long("out").value_name("PATH")),
                ))
                .subcommand(range_args(
                    Command::new("pdf")
                        .about("Export the financial report as PDF")
                        .arg(Arg::new("out").long("out").value_name("PATH")),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Report settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set-shop-name").arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("set-currency").arg(
                        Arg::new("currency")
                            .required(true)
                            .help("ISO 4217 code, e.g. INR"),
                    ),
                ),
        )
        .subcommand(Command::new("doctor").about("Find stored rows the reports would reject"))
}
