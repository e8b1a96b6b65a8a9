// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Command, arg};

pub fn build_cli() -> Command {
    Command::new("nestegg")
        .about("Personal finance: records, projections, goals and a financial score")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("tx")
                .about("Income and expense records")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(arg!(--kind <KIND> "income|expense").required(true))
                        .arg(arg!(--description <TEXT>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--subcategory <SUBCATEGORY>))
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, default today"))
                        .arg(arg!(--fixed "Repeats every month from its date"))
                        .arg(arg!(--months <N> "Split into N monthly installments"))
                        .arg(arg!(--emotion <EMOTION> "How you felt (expenses)")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List records")
                        .arg(arg!(--kind <KIND> "income|expense|investment"))
                        .arg(arg!(--month <MONTH> "YYYY-MM"))
                        .arg(arg!(--category <CATEGORY>))
                        .arg(arg!(--json "JSON output"))
                        .arg(arg!(--jsonl "JSON Lines output")),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a record by id")
                        .arg(arg!(<ID> "Record id")),
                ),
        )
        .subcommand(
            Command::new("invest")
                .about("Investment positions")
                .subcommand(
                    Command::new("add-market")
                        .about("Add a market-traded position")
                        .arg(arg!(--description <TEXT>).required(true))
                        .arg(arg!(--ticker <TICKER>).required(true))
                        .arg(arg!(--quantity <QTY>).required(true))
                        .arg(arg!(--price <PRICE> "Purchase price per unit").required(true))
                        .arg(arg!(--"asset-type" <TYPE> "Stocks, FIIs, Crypto, ..."))
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, default today")),
                )
                .subcommand(
                    Command::new("add-fixed")
                        .about("Add a fixed-income position")
                        .arg(arg!(--description <TEXT>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--"yield-type" <TYPE> "cdi|ipca|pre").required(true))
                        .arg(arg!(--rate <RATE> "Annual % (PRE) or % of index").required(true))
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, default today")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List positions with current values")
                        .arg(arg!(--json "JSON output"))
                        .arg(arg!(--jsonl "JSON Lines output")),
                )
                .subcommand(
                    Command::new("refresh")
                        .about("Refresh market prices and macro rates, then reproject")
                        .arg(arg!(--offline "Skip network; use overrides and defaults"))
                        .arg(arg!(--selic <RATE> "Override SELIC (annual fraction)"))
                        .arg(arg!(--cdi <RATE> "Override CDI (annual fraction)"))
                        .arg(arg!(--ipca <RATE> "Override IPCA (annual fraction)"))
                        .arg(
                            arg!(--price <PAIR> "Override TICKER=PRICE")
                                .action(clap::ArgAction::Append),
                        ),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Create a goal")
                        .arg(arg!(--title <TITLE>).required(true))
                        .arg(arg!(--target <AMOUNT>).required(true))
                        .arg(arg!(--deadline <DATE> "YYYY-MM-DD").required(true))
                        .arg(arg!(--priority <PRIORITY> "high|medium|low")),
                )
                .subcommand(
                    Command::new("emergency")
                        .about("Create an emergency fund goal from spending history")
                        .arg(arg!(--months <N> "Months of coverage, default 6")),
                )
                .subcommand(
                    Command::new("deposit")
                        .about("Add money to a goal")
                        .arg(arg!(<ID> "Goal id"))
                        .arg(arg!(--amount <AMOUNT>).required(true)),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a goal by id")
                        .arg(arg!(<ID> "Goal id")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List goals and progress")
                        .arg(arg!(--json "JSON output"))
                        .arg(arg!(--jsonl "JSON Lines output")),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Monthly totals, net worth and financial score")
                .arg(arg!(--json "JSON output")),
        )
        .subcommand(
            Command::new("timeline")
                .about("Planned records for a month")
                .arg(arg!(--month <MONTH> "YYYY-MM, default current"))
                .arg(arg!(--json "JSON output"))
                .arg(arg!(--jsonl "JSON Lines output")),
        )
        .subcommand(
            Command::new("advise")
                .about("Should I buy this? Purchase triage")
                .arg(arg!(--description <TEXT>).required(true))
                .arg(arg!(--amount <AMOUNT>).required(true))
                .arg(arg!(--importance <IMPORTANCE> "need|desire").required(true))
                .arg(arg!(--emotion <EMOTION> "How you feel right now").required(true))
                .arg(arg!(--json "JSON output")),
        )
        .subcommand(
            Command::new("badges")
                .about("Unlocked achievements and current level")
                .arg(arg!(--json "JSON output")),
        )
        .subcommand(
            Command::new("profile")
                .about("Plan and display settings")
                .subcommand(
                    Command::new("set-plan")
                        .about("Switch between free and premium")
                        .arg(arg!(<PLAN> "free|premium")),
                )
                .subcommand(
                    Command::new("set-currency")
                        .about("Display currency code")
                        .arg(arg!(<CURRENCY> "e.g. BRL, USD")),
                )
                .subcommand(Command::new("show").about("Show current settings")),
        )
        .subcommand(
            Command::new("insight").about("One AI-generated observation about your finances"),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("records")
                        .about("Export all records")
                        .arg(arg!(--format <FORMAT> "csv|json").required(true))
                        .arg(arg!(--out <FILE>).required(true)),
                )
                .subcommand(
                    Command::new("goals")
                        .about("Export goals")
                        .arg(arg!(--format <FORMAT> "csv|json").required(true))
                        .arg(arg!(--out <FILE>).required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
