// Copyright (c) 2025 Nestegg Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde_json::json;

use crate::db;
use crate::engine::aggregate::Aggregates;
use crate::engine::badges::level_for;
use crate::utils::{fmt_money, get_currency, pretty_table};

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = Utc::now().date_naive();
    let records = db::load_transactions(conn)?;
    let agg = Aggregates::compute(&records, today);
    let level = level_for(agg.score);
    let ccy = get_currency(conn)?;

    if sub.get_flag("json") {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "as_of": today.to_string(),
                "currency": ccy,
                "aggregates": agg,
                "level": level.title,
            }))?
        );
        return Ok(());
    }

    let rows = vec![
        vec!["Monthly income".into(), fmt_money(&agg.monthly_income, &ccy)],
        vec!["Monthly expenses".into(), fmt_money(&agg.monthly_expense, &ccy)],
        vec![
            "Monthly balance".into(),
            fmt_money(&(agg.monthly_income - agg.monthly_expense), &ccy),
        ],
        vec!["Total invested".into(), fmt_money(&agg.total_invested, &ccy)],
        vec!["Liquid cash".into(), fmt_money(&agg.liquid_cash, &ccy)],
        vec!["Net worth".into(), fmt_money(&agg.net_worth, &ccy)],
        vec!["Score".into(), format!("{} / 850", agg.score)],
        vec!["Level".into(), level.title.to_string()],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}
