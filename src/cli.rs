// Copyright (c) 2026 Billfold contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("billfold")
        .about("Offline-first personal expense tracker with budgets and spending analytics")
        .version(crate_version!())
        .subcommand(
            Command::new("init").about("Create the database and seed starter data if it is empty"),
        )
        .subcommand(tx_cmd())
        .subcommand(category_cmd())
        .subcommand(budget_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(import_cmd())
        .subcommand(
            Command::new("reset")
                .about("Delete all transactions, categories and budgets")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .help("Skip the confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for consistency issues"))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and inspect transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .value_name("AMOUNT")
                        .required(true)
                        .allow_negative_numbers(true)
                        .help("Signed amount; negative values are expenses"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_name("ID")
                        .required(true)
                        .help("Category id"),
                )
                .arg(
                    Arg::new("desc")
                        .long("desc")
                        .value_name("TEXT")
                        .help("Free-form description"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("DATE")
                        .help("YYYY-MM-DD or full UTC timestamp; defaults to now"),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_name("KIND")
                        .help("income or expense; defaults to the sign of the amount"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_name("KIND")
                        .help("Only income or expense"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_name("ID")
                        .help("Only one category"),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("DATE")
                        .help("Inclusive start date"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("DATE")
                        .help("Inclusive end date"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .help("Keep at most N rows"),
                )
                .arg(json_arg())
                .arg(jsonl_arg()),
        )
        .subcommand(
            Command::new("show")
                .about("Show a single transaction")
                .arg(id_arg("Transaction id"))
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of a transaction")
                .arg(id_arg("Transaction id"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .value_name("AMOUNT")
                        .allow_negative_numbers(true)
                        .help("New signed amount"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_name("ID")
                        .help("New category id"),
                )
                .arg(
                    Arg::new("desc")
                        .long("desc")
                        .value_name("TEXT")
                        .help("New description"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("DATE")
                        .help("New date"),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_name("KIND")
                        .help("New kind (income or expense)"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(id_arg("Transaction id")),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage income and expense categories")
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .required(true)
                        .help("Display name"),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_name("KIND")
                        .required(true)
                        .help("income or expense"),
                )
                .arg(
                    Arg::new("icon")
                        .long("icon")
                        .value_name("ICON")
                        .help("Emoji shown next to the name"),
                )
                .arg(
                    Arg::new("color")
                        .long("color")
                        .value_name("HEX")
                        .help("Hex color such as #10B981"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List categories")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_name("KIND")
                        .help("Only income or expense"),
                )
                .arg(json_arg())
                .arg(jsonl_arg()),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of a category")
                .arg(id_arg("Category id"))
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .help("New display name"),
                )
                .arg(
                    Arg::new("icon")
                        .long("icon")
                        .value_name("ICON")
                        .help("New emoji"),
                )
                .arg(
                    Arg::new("color")
                        .long("color")
                        .value_name("HEX")
                        .help("New hex color"),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_name("KIND")
                        .help("New kind (income or expense)"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a category; transactions and budgets keep the old id")
                .arg(id_arg("Category id")),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Manage spending budgets")
        .subcommand(
            Command::new("add")
                .about("Create a budget watching one category")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_name("ID")
                        .required(true)
                        .help("Watched category id"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_name("AMOUNT")
                        .required(true)
                        .help("Spending limit for the window"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .help("Display name; defaults to '<category> budget'"),
                )
                .arg(
                    Arg::new("period")
                        .long("period")
                        .value_name("PERIOD")
                        .help("weekly, monthly or yearly; defaults to monthly"),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("DATE")
                        .help("Window start; defaults to the current period"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("DATE")
                        .help("Window end; defaults to the current period"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List budgets")
                .arg(json_arg())
                .arg(jsonl_arg()),
        )
        .subcommand(
            Command::new("status")
                .about("Show limit, running spend and usage per budget")
                .arg(json_arg())
                .arg(jsonl_arg()),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of a budget")
                .arg(id_arg("Budget id"))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .value_name("ID")
                        .help("New watched category id"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .help("New display name"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_name("AMOUNT")
                        .help("New spending limit"),
                )
                .arg(
                    Arg::new("spent")
                        .long("spent")
                        .value_name("AMOUNT")
                        .help("Overwrite the running spend counter"),
                )
                .arg(
                    Arg::new("period")
                        .long("period")
                        .value_name("PERIOD")
                        .help("New period (weekly, monthly or yearly)"),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("DATE")
                        .help("New window start"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("DATE")
                        .help("New window end"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a budget")
                .arg(id_arg("Budget id")),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Spending and income analytics")
        .subcommand(
            Command::new("monthly")
                .about("Income and expense totals for the last six active months")
                .arg(refresh_arg())
                .arg(json_arg())
                .arg(jsonl_arg()),
        )
        .subcommand(
            Command::new("weekly")
                .about("Expense totals per weekday over the trailing seven days")
                .arg(refresh_arg())
                .arg(json_arg())
                .arg(jsonl_arg()),
        )
        .subcommand(
            Command::new("summary")
                .about("Current-month income, expense and balance")
                .arg(refresh_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("by-category")
                .about("Current-month expenses grouped by category, largest first")
                .arg(json_arg())
                .arg(jsonl_arg()),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Write stored data to files")
        .subcommand(
            Command::new("bundle")
                .about("Write all three tables to one JSON bundle")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("FILE")
                        .required(true)
                        .help("Output path"),
                ),
        )
        .subcommand(
            Command::new("transactions")
                .about("Write transactions as CSV or JSON")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("FORMAT")
                        .default_value("csv")
                        .help("csv or json"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("FILE")
                        .required(true)
                        .help("Output path"),
                ),
        )
}

fn import_cmd() -> Command {
    Command::new("import")
        .about("Load data from files")
        .subcommand(
            Command::new("bundle")
                .about("Replace all stored data with the contents of a JSON bundle")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .value_name("FILE")
                        .required(true)
                        .help("Bundle written by 'export bundle'"),
                ),
        )
        .subcommand(
            Command::new("transactions")
                .about("Append transactions from a CSV file")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .value_name("FILE")
                        .required(true)
                        .help("CSV with date,amount,category,description,kind columns"),
                ),
        )
}

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .long("id")
        .value_name("ID")
        .required(true)
        .help(help)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print as pretty JSON")
        .action(ArgAction::SetTrue)
}

fn jsonl_arg() -> Arg {
    Arg::new("jsonl")
        .long("jsonl")
        .help("Print as JSON lines")
        .action(ArgAction::SetTrue)
}

fn refresh_arg() -> Arg {
    Arg::new("refresh")
        .long("refresh")
        .help("Recompute instead of serving the cached snapshot")
        .action(ArgAction::SetTrue)
}
